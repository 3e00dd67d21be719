use axum::{extract::State, Json};
use validator::Validate;

use super::user_not_found;
use crate::error::AppResult;
use crate::extract::{JsonOrForm, QueryParams, UserId};
use crate::models::exercise::{
    CreateExerciseRequest, Exercise, ExerciseResponse, LogQuery, LogResponse,
};
use crate::AppState;

pub async fn add_exercise(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    JsonOrForm(body): JsonOrForm<CreateExerciseRequest>,
) -> AppResult<Json<ExerciseResponse>> {
    body.validate()?;

    let exercise = Exercise::from_request(&body);
    let user = state
        .store
        .append_exercise(user_id, &exercise)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::debug!(user_id = %user.id, date = %exercise.date, "Exercise logged");

    Ok(Json(ExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: exercise.date,
        id: user.id,
    }))
}

pub async fn get_log(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    QueryParams(query): QueryParams<LogQuery>,
) -> AppResult<Json<LogResponse>> {
    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(user_not_found)?;

    let log = query.apply(user.log);

    Ok(Json(LogResponse {
        username: user.username,
        count: log.len(),
        id: user.id,
        log,
    }))
}
