//! Chat and message types.
//!
//! A chat is a uniquely titled conversation container; a message is a
//! timestamped text entry that belongs to exactly one chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Storage-generated identifier of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Storage-generated identifier of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted chat.
///
/// `messages` is not part of the chat row. It is filled on demand by
/// retrieval (newest first) and is always serialized, as `[]` when nothing
/// was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A persisted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A chat that has not been stored yet (no id assigned).
#[derive(Debug, Clone)]
pub struct NewChat {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl NewChat {
    /// Attach the storage-generated id, producing a chat with no messages.
    pub fn into_chat(self, id: ChatId) -> Chat {
        Chat {
            id,
            title: self.title,
            created_at: self.created_at,
            messages: Vec::new(),
        }
    }
}

/// A message that has not been stored yet (no id assigned).
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    /// Attach the storage-generated id.
    pub fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            chat_id: self.chat_id,
            text: self.text,
            created_at: self.created_at,
        }
    }
}

/// Body of `POST /chats`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatRequest {
    pub title: String,
}

/// Body of `POST /chats/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
}
