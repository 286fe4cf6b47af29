//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST   /chats       - Create a chat
//! - GET    /chats/{id}  - Get a chat with its most recent messages
//! - DELETE /chats/{id}  - Delete a chat and its messages

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use chatkeep_core::validation;
use chatkeep_types::chat::{Chat, CreateChatRequest};

use super::{parse_chat_id, parse_json};
use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for chat retrieval.
///
/// `limit` is taken as text so that junk values fall back to the default
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct GetChatQuery {
    pub limit: Option<String>,
}

/// POST /chats - Create a new chat.
pub async fn create_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Chat>), AppError> {
    let request: CreateChatRequest = parse_json(&body)?;
    let title = validation::normalize_title(&request.title)?;

    let chat = state.chat_service.create_chat(title).await?;

    Ok((StatusCode::CREATED, Json(chat)))
}

/// GET /chats/{id}?limit=N - Get a chat with up to N newest messages.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GetChatQuery>,
) -> Result<Json<Chat>, AppError> {
    let id = parse_chat_id(&id)?;
    let limit = validation::resolve_limit(query.limit.as_deref());

    let chat = state.chat_service.get_chat(id, limit).await?;

    Ok(Json(chat))
}

/// DELETE /chats/{id} - Delete a chat.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_chat_id(&id)?;

    state.chat_service.delete_chat(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
