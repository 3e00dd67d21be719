use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::JsonOrForm;
use crate::models::user::{CreateUserRequest, UserSummary};
use crate::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<CreateUserRequest>,
) -> AppResult<Json<UserSummary>> {
    body.validate()?;

    let user = state.store.create_user(&body.username).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(user))
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}
