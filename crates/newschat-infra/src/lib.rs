//! Infrastructure layer for newschat.
//!
//! Contains implementations of the port traits defined in `newschat-core`:
//! OpenAI chat completion and embeddings over reqwest, the World News API
//! client, JSON file repositories in the data directory, environment
//! credential lookup, and the config loader.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod news;
pub mod secret;
