//! Shared domain types for chatkeep.
//!
//! This crate contains the domain types used across the service: Chat,
//! Message, their identifiers, the error taxonomy and configuration types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
