//! Shared domain types for newschat.
//!
//! This crate contains the data shapes used across the workspace: news
//! articles and their embeddings, chat messages and the append-only
//! conversation log, stream frames, global configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod article;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod stream;
