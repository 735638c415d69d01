use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("User with name '{0}' already exists")]
    DuplicateName(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Upload exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("JSON body rejected: {0}")]
    Json(#[from] JsonRejection),

    #[error("Multipart request rejected: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    /// Convert a multipart read error, naming the upload limit when the body
    /// was cut off for being too large
    pub fn from_multipart(err: MultipartError, limit: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!("Upload rejected: body exceeds {} bytes", limit);
            AppError::PayloadTooLarge { limit }
        } else {
            AppError::Multipart(err)
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DuplicateName(ref name) => (
                StatusCode::CONFLICT,
                format!("User with name '{}' already exists", name),
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MalformedInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Upload exceeds the maximum allowed size of {} bytes", limit),
            ),
            AppError::Json(ref e) => {
                tracing::warn!("JSON body rejected: {}", e.body_text());
                (e.status(), e.body_text())
            }
            AppError::MultipartRejection(ref e) => {
                tracing::warn!("Multipart request rejected: {}", e.body_text());
                (e.status(), e.body_text())
            }
            AppError::Multipart(ref e) => {
                tracing::warn!("Multipart error: {}", e.body_text());
                (e.status(), e.body_text())
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
