//! Business logic services (use cases).
//!
//! Services build entities from request data, call repositories and translate
//! storage failures into the caller-facing error taxonomy. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod chat;
