use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::ServiceError;

/// Error returned by handlers, rendered as `{"error": .., "code": ..}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The request could not be parsed into the handler's input.
    #[error("{0}")]
    Malformed(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            ApiError::Malformed(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::Service(err) => match err {
                ServiceError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                ServiceError::VideoNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "VIDEO_NOT_FOUND", err.to_string())
                }
                ServiceError::DuplicateTranslation { .. } => {
                    (StatusCode::CONFLICT, "DUPLICATE_TRANSLATION", err.to_string())
                }
                ServiceError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION", err.to_string())
                }
                ServiceError::ConcurrentUpdate { .. } => {
                    (StatusCode::CONFLICT, "CONCURRENT_UPDATE", err.to_string())
                }
                ServiceError::Integrity(_) | ServiceError::Database(_) => {
                    tracing::error!(error = %err, "Request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
