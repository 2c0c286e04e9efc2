//! In-memory vector store over the embedded article corpus.

use newschat_types::article::{EmbeddedArticle, RankedArticle};
use newschat_types::error::RankError;

use super::ranker;

/// The embedded corpus, constructed once at startup and read-only afterwards.
///
/// Shared across turns by reference; scanning is exhaustive, so there is no
/// index to maintain.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    items: Vec<EmbeddedArticle>,
}

impl VectorStore {
    pub fn new(items: Vec<EmbeddedArticle>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[EmbeddedArticle] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dimensionality of the first stored vector, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.items.first().map(|item| item.vector().len())
    }

    /// Tokens billed for embedding the whole corpus.
    pub fn total_tokens(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.token_count())).sum()
    }

    /// Rank every stored item against `query`. See [`ranker::rank`].
    pub fn rank(&self, query: &[f32]) -> Result<Vec<RankedArticle<'_>>, RankError> {
        ranker::rank(query, &self.items)
    }
}

impl From<Vec<EmbeddedArticle>> for VectorStore {
    fn from(items: Vec<EmbeddedArticle>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newschat_types::article::{Article, Embedding};

    fn item(title: &str, vector: Vec<f32>, tokens: u32) -> EmbeddedArticle {
        EmbeddedArticle::new(
            Article {
                title: title.to_string(),
                text: String::new(),
                publish_date: String::new(),
            },
            Embedding {
                vector,
                total_tokens: tokens,
            },
        )
    }

    #[test]
    fn test_empty_store() {
        let store = VectorStore::default();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);
        assert!(store.rank(&[1.0]).unwrap().is_empty());
    }

    #[test]
    fn test_store_metadata() {
        let store = VectorStore::new(vec![
            item("a", vec![1.0, 0.0, 0.0], 4),
            item("b", vec![0.0, 1.0, 0.0], 6),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.dimension(), Some(3));
        assert_eq!(store.total_tokens(), 10);
    }

    #[test]
    fn test_store_rank_delegates() {
        let store: VectorStore = vec![item("a", vec![0.0, 1.0], 1), item("b", vec![1.0, 0.0], 1)].into();
        let ranked = store.rank(&[1.0, 0.0]).unwrap();
        assert_eq!(ranked[0].item.title(), "b");
        assert!(store.rank(&[1.0, 0.0, 0.0]).is_err());
    }
}
