//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (chatkeep-infra) implements. Each call owns its transaction: it begins,
//! commits or rolls back before returning, and a dropped call rolls back.

pub mod chat;
pub mod message;
