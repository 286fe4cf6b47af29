//! HTTP/REST layer for chatkeep.
//!
//! Axum routes for chats and messages. Handlers parse and validate input,
//! call the service façade and shape JSON responses.

pub mod error;
pub mod handlers;
pub mod router;
