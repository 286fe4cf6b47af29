//! Business logic and repository trait definitions for chatkeep.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the service façade that callers use, and request
//! validation. It depends only on `chatkeep-types` -- never on
//! `chatkeep-infra` or any database/IO crate.

pub mod repository;
pub mod service;
pub mod validation;
