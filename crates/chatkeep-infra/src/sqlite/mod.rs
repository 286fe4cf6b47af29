//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode, enforced foreign
//! keys and split read/write connection pools.

pub mod chat;
pub mod convert;
pub mod message;
pub mod pool;
