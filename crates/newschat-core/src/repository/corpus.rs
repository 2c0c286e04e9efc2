//! Corpus repository trait definition.

use newschat_types::article::EmbeddedArticle;
use newschat_types::error::RepositoryError;

/// Persistence for the embedded article corpus.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CorpusRepository: Send + Sync {
    /// Load the whole corpus. Returns `NotFound` if no corpus has been built.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<EmbeddedArticle>, RepositoryError>> + Send;

    /// Replace the stored corpus.
    fn save(
        &self,
        corpus: &[EmbeddedArticle],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
