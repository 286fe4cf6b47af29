//! Chat service façade.
//!
//! ChatService stamps new entities, forwards them to the repositories and maps
//! `RepositoryError` variants onto `ChatError`. It never retries: a failed call
//! is reported once and the caller decides what to do.

use std::future::Future;
use std::time::Duration;

use chatkeep_types::chat::{Chat, ChatId, Message, NewChat, NewMessage};
use chatkeep_types::error::{ChatError, RepositoryError};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::repository::chat::ChatRepository;
use crate::repository::message::MessageRepository;

/// Default upper bound for one operation.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Orchestrates chat and message persistence.
///
/// Generic over `ChatRepository` and `MessageRepository` so the storage engine
/// can be swapped or faked without touching this type.
pub struct ChatService<C: ChatRepository, M: MessageRepository> {
    chat_repo: C,
    message_repo: M,
    request_timeout: Duration,
}

impl<C: ChatRepository, M: MessageRepository> ChatService<C, M> {
    /// Create a new chat service with the given repositories.
    pub fn new(chat_repo: C, message_repo: M) -> Self {
        Self {
            chat_repo,
            message_repo,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-operation deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create a chat with an already validated title.
    pub async fn create_chat(&self, title: String) -> Result<Chat, ChatError> {
        let new_chat = NewChat {
            title,
            created_at: Utc::now(),
        };

        let result = self
            .within_deadline("create_chat", self.chat_repo.create_if_not_exists(&new_chat))
            .await?;

        match result {
            Ok(chat) => {
                info!(chat_id = %chat.id, title = %chat.title, "Chat created");
                Ok(chat)
            }
            Err(RepositoryError::Conflict(_)) => {
                debug!(title = %new_chat.title, "Chat title already taken");
                Err(ChatError::ChatAlreadyExists(new_chat.title))
            }
            Err(e) => Err(internal("create chat", e)),
        }
    }

    /// Get a chat with up to `limit` of its most recent messages.
    pub async fn get_chat(&self, id: ChatId, limit: u32) -> Result<Chat, ChatError> {
        let result = self
            .within_deadline("get_chat", self.chat_repo.get_by_id(id, limit))
            .await?;

        match result {
            Ok(chat) => Ok(chat),
            Err(RepositoryError::NotFound) => Err(ChatError::ChatNotFound(id)),
            Err(e) => Err(internal("get chat", e)),
        }
    }

    /// Delete a chat and, by cascade, its messages.
    pub async fn delete_chat(&self, id: ChatId) -> Result<(), ChatError> {
        let result = self
            .within_deadline("delete_chat", self.chat_repo.delete_by_id(id))
            .await?;

        match result {
            Ok(()) => {
                info!(chat_id = %id, "Chat deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(ChatError::ChatNotFound(id)),
            Err(e) => Err(internal("delete chat", e)),
        }
    }

    /// Append a message with already validated text to an existing chat.
    pub async fn create_message(&self, chat_id: ChatId, text: String) -> Result<Message, ChatError> {
        let new_message = NewMessage {
            chat_id,
            text,
            created_at: Utc::now(),
        };

        let result = self
            .within_deadline(
                "create_message",
                self.message_repo.create_message(&new_message),
            )
            .await?;

        match result {
            Ok(message) => {
                debug!(chat_id = %chat_id, message_id = %message.id, "Message created");
                Ok(message)
            }
            Err(RepositoryError::MissingReference(_)) => Err(ChatError::MessageChatNotFound(chat_id)),
            Err(e) => Err(internal("create message", e)),
        }
    }

    /// Run a repository call under the request deadline.
    ///
    /// On expiry the inner future is dropped, which rolls back any open
    /// transaction it holds.
    async fn within_deadline<T, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<Result<T, RepositoryError>, ChatError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        tokio::time::timeout(self.request_timeout, fut)
            .await
            .map_err(|_| {
                warn!(
                    operation,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Operation exceeded deadline"
                );
                ChatError::Internal(format!("{operation} timed out"))
            })
    }
}

/// The single log point for storage failures; callers only see `Internal`.
fn internal(context: &str, err: RepositoryError) -> ChatError {
    error!(error = %err, "Failed to {context}");
    ChatError::Internal(format!("{context}: {err}"))
}
