//! Message HTTP handlers.
//!
//! Endpoints:
//! - POST /chats/{id}/messages - Append a message to a chat

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use chatkeep_core::validation;
use chatkeep_types::chat::{CreateMessageRequest, Message};

use super::{parse_chat_id, parse_json};
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chats/{id}/messages - Create a message in an existing chat.
pub async fn create_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let chat_id = parse_chat_id(&id)?;
    let request: CreateMessageRequest = parse_json(&body)?;
    validation::validate_text(&request.text)?;

    let message = state
        .chat_service
        .create_message(chat_id, request.text)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
