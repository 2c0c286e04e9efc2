//! Business logic and port trait definitions for newschat.
//!
//! This crate holds the retrieval-augmented prompt pipeline (ranking,
//! context assembly, prompt composition, stream aggregation) and the
//! "ports" (completion, embedding, news and repository traits) that the
//! infrastructure layer implements. It depends only on `newschat-types` --
//! never on `newschat-infra` or any HTTP/filesystem crate.

pub mod chat;
pub mod corpus;
pub mod llm;
pub mod prompt;
pub mod repository;
pub mod retrieval;
