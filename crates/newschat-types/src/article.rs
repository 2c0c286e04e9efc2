//! News article and embedding types.
//!
//! An [`EmbeddedArticle`] pairs a raw [`Article`] with the [`Embedding`] of its
//! title. The serialized shape (`{"article": {...}, "embedding": {...}}`) is the
//! on-disk corpus format.

use serde::{Deserialize, Serialize};

/// A raw news article as returned by the news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub publish_date: String,
}

/// Output of the embedding service for a single input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub vector: Vec<f32>,
    /// Tokens the embedding service billed for this input.
    pub total_tokens: u32,
}

impl Embedding {
    /// Dimensionality of the vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// An article together with the embedding of its title.
///
/// Immutable once loaded into a vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedArticle {
    pub article: Article,
    pub embedding: Embedding,
}

impl EmbeddedArticle {
    pub fn new(article: Article, embedding: Embedding) -> Self {
        Self { article, embedding }
    }

    pub fn title(&self) -> &str {
        &self.article.title
    }

    /// The article text used as reference material in prompts.
    pub fn body(&self) -> &str {
        &self.article.text
    }

    pub fn vector(&self) -> &[f32] {
        &self.embedding.vector
    }

    pub fn token_count(&self) -> u32 {
        self.embedding.total_tokens
    }
}

/// An article scored against a query vector.
///
/// Borrows from the vector store; produced per query and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct RankedArticle<'a> {
    pub item: &'a EmbeddedArticle,
    pub score: f32,
}
