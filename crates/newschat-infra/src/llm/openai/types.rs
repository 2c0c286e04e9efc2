//! Request and response bodies for the OpenAI embeddings endpoint.
//!
//! The chat-completion request body is [`newschat_types::llm::CompletionRequest`]
//! itself; its serde shape matches the wire format. Streamed chat chunks are
//! parsed by [`newschat_types::stream::StreamFrame`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub input: &'a str,
    pub model: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
    pub usage: EmbeddingUsage,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingUsage {
    pub total_tokens: u32,
}
