use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a short URL with code `{0}` is already saved")]
    DuplicateCode(String),

    #[error("the slot was modified by another writer")]
    ConcurrentWrite,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The backend could not be reached, or its reply was not JSON.
    #[error("Failed to create short URL")]
    BackendUnreachable,

    /// The backend answered with a non-success status.
    #[error("backend rejected the request with status {0}")]
    BackendRejected(u16),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BackendUnreachable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create short URL")
            }
            AppError::BackendRejected(_) => (StatusCode::BAD_GATEWAY, "Failed to create short URL"),
            AppError::Store(StoreError::DuplicateCode(_)) => {
                (StatusCode::CONFLICT, "This short URL is already saved")
            }
            AppError::Store(StoreError::ConcurrentWrite) => (
                StatusCode::CONFLICT,
                "The saved URLs changed underneath us, try again",
            ),
            AppError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
