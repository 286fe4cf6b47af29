//! ChatRepository trait definition.

use chatkeep_types::chat::{Chat, ChatId, NewChat};
use chatkeep_types::error::RepositoryError;

/// Repository trait for chat persistence.
///
/// Implementations live in chatkeep-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Insert a chat unless one with the same title already exists.
    ///
    /// Count-then-insert inside one transaction. The storage uniqueness
    /// constraint backs the count check; a violation of it is reported as
    /// `Conflict` as well. Returns the stored chat with an empty message list.
    fn create_if_not_exists(
        &self,
        chat: &NewChat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Fetch a chat with up to `limit` of its messages, newest first.
    ///
    /// `limit == 0` loads no messages. Returns `NotFound` if the chat does not exist.
    fn get_by_id(
        &self,
        id: ChatId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Delete a chat and its messages. Returns `NotFound` if no row was deleted.
    fn delete_by_id(
        &self,
        id: ChatId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
