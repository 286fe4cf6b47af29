//! HTTP request handlers for the REST API.

pub mod chat;
pub mod message;

use serde::de::DeserializeOwned;

use chatkeep_types::chat::ChatId;

use crate::http::error::AppError;

/// Parse a chat id from a path parameter, returning a 400 error on invalid format.
fn parse_chat_id(raw: &str) -> Result<ChatId, AppError> {
    raw.parse::<ChatId>()
        .map_err(|_| AppError::BadRequest("ID path param must be integer".to_string()))
}

/// Decode a JSON request body.
///
/// The `Content-Type` header is not checked: any body that parses is accepted.
fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|_| AppError::BadRequest("Invalid json".to_string()))
}
