//! Corpus builder.
//!
//! Titles are embedded one at a time, in the order the news source returned
//! the articles, so the saved corpus keeps that order.

use newschat_types::article::{Article, EmbeddedArticle};
use newschat_types::error::NewsError;
use newschat_types::llm::LlmError;

use super::source::NewsSource;
use crate::retrieval::embedder::Embedder;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error(transparent)]
    News(#[from] NewsError),

    #[error("embedding failed for article '{title}': {source}")]
    Embedding {
        title: String,
        #[source]
        source: LlmError,
    },
}

/// Progress notifications emitted while building.
#[derive(Debug, Clone, Copy)]
pub enum BuildProgress<'a> {
    /// The news search returned `count` articles.
    Fetched { count: usize },
    /// Article `index` (zero-based) of `total` has been embedded.
    Embedded {
        index: usize,
        total: usize,
        title: &'a str,
    },
}

pub struct CorpusBuilder<S: NewsSource, E: Embedder> {
    source: S,
    embedder: E,
}

impl<S: NewsSource, E: Embedder> CorpusBuilder<S, E> {
    pub fn new(source: S, embedder: E) -> Self {
        Self { source, embedder }
    }

    /// Search for `keyword` and embed the title of every article found.
    ///
    /// Stops at the first embedding failure; nothing partial is returned.
    pub async fn build(
        &self,
        keyword: &str,
        mut on_progress: impl FnMut(BuildProgress<'_>),
    ) -> Result<Vec<EmbeddedArticle>, CorpusError> {
        let articles = self.source.search(keyword).await?;
        let total = articles.len();
        on_progress(BuildProgress::Fetched { count: total });
        tracing::info!(keyword, total, "news articles fetched");

        let mut corpus = Vec::with_capacity(total);
        for (index, article) in articles.into_iter().enumerate() {
            let embedded = self.embed_article(article).await?;
            on_progress(BuildProgress::Embedded {
                index,
                total,
                title: embedded.title(),
            });
            corpus.push(embedded);
        }

        tracing::info!(
            articles = corpus.len(),
            model = self.embedder.model_name(),
            tokens = corpus.iter().map(|a| u64::from(a.token_count())).sum::<u64>(),
            "corpus embedded"
        );
        Ok(corpus)
    }

    async fn embed_article(&self, article: Article) -> Result<EmbeddedArticle, CorpusError> {
        match self.embedder.embed(&article.title).await {
            Ok(embedding) => Ok(EmbeddedArticle::new(article, embedding)),
            Err(source) => Err(CorpusError::Embedding {
                title: article.title,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use newschat_types::article::Embedding;

    use super::*;

    struct FakeSource {
        articles: Vec<Article>,
    }

    impl NewsSource for FakeSource {
        async fn search(&self, _keyword: &str) -> Result<Vec<Article>, NewsError> {
            Ok(self.articles.clone())
        }
    }

    struct BrokenSource;

    impl NewsSource for BrokenSource {
        async fn search(&self, _keyword: &str) -> Result<Vec<Article>, NewsError> {
            Err(NewsError::Status {
                status: 401,
                body: "bad key".to_string(),
            })
        }
    }

    /// Embeds a text as `[len, first byte]` and records every input.
    #[derive(Default)]
    struct RecordingEmbedder {
        inputs: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl Embedder for RecordingEmbedder {
        async fn embed(&self, text: &str) -> Result<Embedding, LlmError> {
            self.inputs.lock().unwrap().push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(LlmError::RateLimited {
                    retry_after_ms: None,
                });
            }
            Ok(Embedding {
                vector: vec![text.len() as f32, f32::from(text.as_bytes()[0])],
                total_tokens: 2,
            })
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            text: format!("body of {title}"),
            publish_date: "2023-05-03 08:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_embeds_titles_in_order() {
        let source = FakeSource {
            articles: vec![article("Alpha"), article("Beta"), article("Gamma")],
        };
        let builder = CorpusBuilder::new(source, RecordingEmbedder::default());

        let mut embedded_titles = Vec::new();
        let mut fetched = None;
        let corpus = builder
            .build("microsoft", |progress| match progress {
                BuildProgress::Fetched { count } => fetched = Some(count),
                BuildProgress::Embedded { title, .. } => embedded_titles.push(title.to_string()),
            })
            .await
            .unwrap();

        assert_eq!(fetched, Some(3));
        assert_eq!(embedded_titles, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(
            *builder.embedder.inputs.lock().unwrap(),
            vec!["Alpha", "Beta", "Gamma"]
        );
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus[1].body(), "body of Beta");
        assert_eq!(corpus[1].vector(), &[4.0, f32::from(b'B')]);
    }

    #[tokio::test]
    async fn test_build_stops_at_embedding_failure() {
        let source = FakeSource {
            articles: vec![article("Alpha"), article("Beta"), article("Gamma")],
        };
        let embedder = RecordingEmbedder {
            fail_on: Some("Beta".to_string()),
            ..Default::default()
        };
        let builder = CorpusBuilder::new(source, embedder);

        let err = builder.build("k", |_| {}).await.unwrap_err();
        match err {
            CorpusError::Embedding { title, .. } => assert_eq!(title, "Beta"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(builder.embedder.inputs.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_build_propagates_news_error() {
        let builder = CorpusBuilder::new(BrokenSource, RecordingEmbedder::default());
        let err = builder.build("k", |_| {}).await.unwrap_err();
        assert!(matches!(err, CorpusError::News(NewsError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_build_empty_search() {
        let builder = CorpusBuilder::new(FakeSource { articles: vec![] }, RecordingEmbedder::default());
        let corpus = builder.build("nothing", |_| {}).await.unwrap();
        assert!(corpus.is_empty());
    }
}
