//! NewsSource trait definition.

use newschat_types::article::Article;
use newschat_types::error::NewsError;

/// Trait for keyword search against a news provider.
///
/// The World News API implementation lives in newschat-infra.
pub trait NewsSource: Send + Sync {
    /// Fetch articles matching `keyword`, in the provider's order.
    fn search(
        &self,
        keyword: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, NewsError>> + Send;
}
