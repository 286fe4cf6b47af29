//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `chatkeep-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, writes on the
//! single-connection writer, reads in a read transaction on the reader.

use chatkeep_core::repository::chat::ChatRepository;
use chatkeep_types::chat::{Chat, ChatId, Message, MessageId, NewChat};
use chatkeep_types::error::RepositoryError;
use sqlx::Row;
use tracing::debug;

use super::convert::{format_datetime, map_sqlx_error, parse_datetime, truncate_to_storage};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatRow {
    id: i64,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self, messages: Vec<Message>) -> Result<Chat, RepositoryError> {
        Ok(Chat {
            id: ChatId(self.id),
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
            messages,
        })
    }
}

struct MessageRow {
    id: i64,
    chat_id: i64,
    text: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        Ok(Message {
            id: MessageId(self.id),
            chat_id: ChatId(self.chat_id),
            text: self.text,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_if_not_exists(&self, chat: &NewChat) -> Result<Chat, RepositoryError> {
        let conflict = || {
            RepositoryError::Conflict(format!("chat with title '{}' already exists", chat.title))
        };

        let chat = NewChat {
            created_at: truncate_to_storage(chat.created_at),
            ..chat.clone()
        };

        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chats WHERE title = ?")
            .bind(&chat.title)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if count > 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Err(conflict());
        }

        // The UNIQUE constraint still guards writers outside this pool.
        let result = sqlx::query("INSERT INTO chats (title, created_at) VALUES (?, ?)")
            .bind(&chat.title)
            .bind(format_datetime(&chat.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| match map_sqlx_error(e) {
                RepositoryError::Conflict(_) => conflict(),
                other => other,
            })?;

        tx.commit().await.map_err(|e| match map_sqlx_error(e) {
            RepositoryError::Conflict(_) => conflict(),
            other => other,
        })?;

        let id = ChatId(result.last_insert_rowid());
        debug!(chat_id = %id, "Inserted chat row");
        Ok(chat.into_chat(id))
    }

    async fn get_by_id(&self, id: ChatId, limit: u32) -> Result<Chat, RepositoryError> {
        // One read transaction so the chat row and its messages come from
        // the same snapshot.
        let mut tx = self.pool.reader.begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query("SELECT id, title, created_at FROM chats WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };
        let chat_row = ChatRow::from_row(&row).map_err(map_sqlx_error)?;

        let mut messages = Vec::new();
        if limit > 0 {
            let rows = sqlx::query(
                "SELECT id, chat_id, text, created_at FROM messages
                 WHERE chat_id = ?
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?",
            )
            .bind(id.0)
            .bind(i64::from(limit))
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            messages.reserve(rows.len());
            for row in &rows {
                let message_row = MessageRow::from_row(row).map_err(map_sqlx_error)?;
                messages.push(message_row.into_message()?);
            }
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        chat_row.into_chat(messages)
    }

    async fn delete_by_id(&self, id: ChatId) -> Result<(), RepositoryError> {
        // Messages go with the chat through ON DELETE CASCADE, inside this
        // single statement.
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
