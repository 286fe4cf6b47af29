//! MessageRepository trait definition.

use chatkeep_types::chat::{Message, NewMessage};
use chatkeep_types::error::RepositoryError;

/// Repository trait for message persistence.
pub trait MessageRepository: Send + Sync {
    /// Insert a message if its parent chat exists.
    ///
    /// Returns `MissingReference` when the chat is absent, either at the
    /// existence check or (via the foreign key) at insert/commit time.
    fn create_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;
}
