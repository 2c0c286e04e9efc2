//! Repository trait definitions (ports).
//!
//! These traits define the persistence interface that the infrastructure
//! layer (newschat-infra) implements with JSON files in the data directory.
//! The core crate never depends on a specific storage technology.

pub mod chat_log;
pub mod corpus;
