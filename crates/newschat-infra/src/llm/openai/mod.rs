//! OpenAI API adapters.
//!
//! One [`client::OpenAiClient`] (base URL, API key, HTTP connection pool) is
//! shared by the chat-completion provider and the embedder. The base URL is
//! configurable, so any OpenAI-compatible server works.

pub mod chat;
pub mod client;
pub mod embeddings;
pub mod streaming;
pub mod types;

pub use chat::OpenAiChatProvider;
pub use client::OpenAiClient;
pub use embeddings::OpenAiEmbedder;
