use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Path identifier that is not a valid user id.
    #[error("Invalid user id \"{0}\"")]
    InvalidId(String),

    /// Body, query string or path that could not be decoded.
    #[error("{0}")]
    MalformedRequest(String),

    #[error("Request timed out")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) | AppError::MalformedRequest(_) => {
                tracing::warn!(error = %self, "Rejected request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Timeout => {
                tracing::error!("Request exceeded the configured timeout");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Turns errors raised by tower middleware (the request timeout) into the
/// same `{error}` responses handlers produce.
pub async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(anyhow::anyhow!(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_is_404_with_flat_error() {
        let (status, body) = body_json(AppError::NotFound("User not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_validation_is_400() {
        let (status, body) = body_json(AppError::Validation("username is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "username is required");
    }

    #[tokio::test]
    async fn test_invalid_id_is_generic_failure() {
        let (status, body) = body_json(AppError::InvalidId("nope".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Invalid user id \"nope\"");
    }

    #[tokio::test]
    async fn test_elapsed_timeout_maps_to_generic_failure() {
        let err = handle_middleware_error(Box::new(tower::timeout::error::Elapsed::new())).await;
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Request timed out" }));
    }

    #[tokio::test]
    async fn test_other_middleware_errors_are_internal() {
        let err = handle_middleware_error("layer exploded".into()).await;
        assert!(matches!(err, AppError::Internal(_)));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "layer exploded");
    }

    #[tokio::test]
    async fn test_internal_carries_message() {
        let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("connection reset"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "connection reset");
    }
}
