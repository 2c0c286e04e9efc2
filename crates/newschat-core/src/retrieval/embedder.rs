//! Embedder trait for text-to-vector conversion.
//!
//! Implementations (e.g., the OpenAI embeddings endpoint) live in newschat-infra.

use newschat_types::article::Embedding;
use newschat_types::llm::LlmError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    ///
    /// The returned vector's dimensionality is fixed by the model and must
    /// match the vectors stored in the corpus.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Embedding, LlmError>> + Send;

    /// The model name used for embeddings (e.g., "text-embedding-ada-002").
    fn model_name(&self) -> &str;
}
