use crate::error::AppError;

pub mod exercises;
pub mod health;
pub mod home;
pub mod users;

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".into())
}
