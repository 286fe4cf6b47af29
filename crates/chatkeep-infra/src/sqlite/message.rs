//! SQLite message repository implementation.
//!
//! Implements `MessageRepository` from `chatkeep-core`. Inserts run in a write
//! transaction on the writer pool after an existence check of the parent chat;
//! the foreign key on `messages.chat_id` backs that check.

use chatkeep_core::repository::message::MessageRepository;
use chatkeep_types::chat::{Message, MessageId, NewMessage};
use chatkeep_types::error::RepositoryError;
use tracing::debug;

use super::convert::{format_datetime, map_sqlx_error, truncate_to_storage};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn create_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let missing_chat =
            || RepositoryError::MissingReference(format!("chat {} not found", message.chat_id));

        let message = NewMessage {
            created_at: truncate_to_storage(message.created_at),
            ..message.clone()
        };

        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chats WHERE id = ?")
            .bind(message.chat_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if count == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(missing_chat());
        }

        let result =
            sqlx::query("INSERT INTO messages (chat_id, text, created_at) VALUES (?, ?, ?)")
                .bind(message.chat_id.0)
                .bind(&message.text)
                .bind(format_datetime(&message.created_at))
                .execute(&mut *tx)
                .await
                .map_err(|e| match map_sqlx_error(e) {
                    RepositoryError::MissingReference(_) => missing_chat(),
                    other => other,
                })?;

        tx.commit().await.map_err(|e| match map_sqlx_error(e) {
            RepositoryError::MissingReference(_) => missing_chat(),
            other => other,
        })?;

        let id = MessageId(result.last_insert_rowid());
        debug!(chat_id = %message.chat_id, message_id = %id, "Inserted message row");
        Ok(message.into_message(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::chat::SqliteChatRepository;
    use chatkeep_core::repository::chat::ChatRepository;
    use chatkeep_types::chat::{ChatId, NewChat};
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        test_pool_with_url().await.0
    }

    async fn test_pool_with_url() -> (DatabasePool, String) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        (DatabasePool::new(&url).await.unwrap(), url)
    }

    fn make_message(chat_id: ChatId, text: &str) -> NewMessage {
        NewMessage {
            chat_id,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    async fn total_messages(pool: &DatabasePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_create_message_in_existing_chat() {
        let pool = test_pool().await;
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool.clone());

        let chat = chats
            .create_if_not_exists(&NewChat {
                title: "General".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let msg = repo
            .create_message(&make_message(chat.id, "Hello, world!"))
            .await
            .unwrap();
        assert_eq!(msg.chat_id, chat.id);
        assert_eq!(msg.text, "Hello, world!");
        assert_eq!(total_messages(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_create_message_for_unknown_chat() {
        let pool = test_pool().await;
        let repo = SqliteMessageRepository::new(pool.clone());

        let err = repo
            .create_message(&make_message(ChatId(999), "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference(_)));
        assert_eq!(total_messages(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_create_message_after_chat_deleted() {
        let pool = test_pool().await;
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool.clone());

        let chat = chats
            .create_if_not_exists(&NewChat {
                title: "Gone".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        chats.delete_by_id(chat.id).await.unwrap();

        let err = repo
            .create_message(&make_message(chat.id, "too late"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference(_)));
        assert_eq!(total_messages(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_foreign_key_classified_structurally() {
        let pool = test_pool().await;

        // Bypass the existence check and hit the foreign key directly.
        let err = sqlx::query("INSERT INTO messages (chat_id, text, created_at) VALUES (?, ?, ?)")
            .bind(12345_i64)
            .bind("orphan")
            .bind(format_datetime(&Utc::now()))
            .execute(&pool.writer)
            .await
            .unwrap_err();
        assert!(matches!(
            map_sqlx_error(err),
            RepositoryError::MissingReference(_)
        ));
        assert_eq!(total_messages(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_dropped_insert_leaves_no_partial_state() {
        let pool = test_pool().await;
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool.clone());

        let chat = chats
            .create_if_not_exists(&NewChat {
                title: "Cancel".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        // Hold the only writer connection so the insert cannot start, then
        // abandon it on a short deadline.
        let guard = pool.writer.acquire().await.unwrap();
        let attempt = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            repo.create_message(&make_message(chat.id, "never")),
        )
        .await;
        assert!(attempt.is_err());
        drop(guard);

        assert_eq!(total_messages(&pool).await, 0);
        // The writer is usable again after the abandoned call.
        repo.create_message(&make_message(chat.id, "later"))
            .await
            .unwrap();
        assert_eq!(total_messages(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_abandoned_transaction_rolls_back() {
        use sqlx::{Connection, Executor, SqliteConnection};

        let (pool, url) = test_pool_with_url().await;
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool.clone());

        let chat = chats
            .create_if_not_exists(&NewChat {
                title: "Locked".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        // A second connection takes the database write lock. The repository
        // still opens its transaction and reads the parent chat, then cannot
        // write: it either waits until the deadline drops it or fails busy.
        let mut blocker = SqliteConnection::connect(&url).await.unwrap();
        blocker.execute("BEGIN IMMEDIATE").await.unwrap();

        let attempt = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            repo.create_message(&make_message(chat.id, "never")),
        )
        .await;
        assert!(!matches!(attempt, Ok(Ok(_))));

        blocker.execute("ROLLBACK").await.unwrap();
        blocker.close().await.unwrap();

        // The writer is usable again and only the later insert is visible.
        let later = repo
            .create_message(&make_message(chat.id, "later"))
            .await
            .unwrap();
        assert_eq!(total_messages(&pool).await, 1);

        let found = chats.get_by_id(chat.id, 20).await.unwrap();
        assert_eq!(found.messages, vec![later]);
    }
}
