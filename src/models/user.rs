use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::exercise::Exercise;
use super::string_or_number;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub log: Vec<Exercise>,
}

/// A user without its log, as returned by creation and listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct UserSummary {
    pub username: String,
    pub id: Uuid,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            username: u.username.clone(),
            id: u.id,
        }
    }
}

/// POST /api/users
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}
