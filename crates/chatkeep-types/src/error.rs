use thiserror::Error;

use crate::chat::ChatId;

/// Errors returned by the service façade to its callers.
///
/// Closed taxonomy: every storage failure that is not one of the first three
/// kinds ends up as `Internal`.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),

    #[error("chat with title '{0}' already exists")]
    ChatAlreadyExists(String),

    #[error("chat {0} not found for new message")]
    MessageChatNotFound(ChatId),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from repository operations (used by trait definitions in chatkeep-core).
///
/// Storage implementations classify their native errors into these variants
/// structurally (constraint kind, affected-row count), never by message text.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("missing reference: {0}")]
    MissingReference(String),
}

/// Rejected request input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);
