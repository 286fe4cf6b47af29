//! Application error type mapping to HTTP status codes and the JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatkeep_types::error::{ChatError, ValidationError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the service façade.
    Chat(ChatError),
    /// Malformed path, body, or field values.
    BadRequest(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::ChatNotFound(_) | ChatError::MessageChatNotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Chat not found".to_string())
            }
            AppError::Chat(ChatError::ChatAlreadyExists(title)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Chat with title {title} already exists"),
            ),
            // Already logged by the service; the detail stays server-side.
            AppError::Chat(ChatError::Internal(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "Internal Server Error".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
