//! Infrastructure layer for chatkeep.
//!
//! Contains implementations of the repository traits defined in
//! `chatkeep-core` (SQLite storage engine) and the configuration loader.

pub mod config;
pub mod sqlite;
