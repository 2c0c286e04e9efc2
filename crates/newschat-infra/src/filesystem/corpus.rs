//! JSON file corpus repository (`news_with_embeddings.json`).

use std::path::{Path, PathBuf};

use newschat_core::repository::corpus::CorpusRepository;
use newschat_types::article::EmbeddedArticle;
use newschat_types::error::RepositoryError;

use super::write_json;

/// File name of the embedded corpus inside the data directory.
pub const CORPUS_FILE: &str = "news_with_embeddings.json";

/// Stores the corpus as one JSON array of `{article, embedding}` objects.
#[derive(Debug, Clone)]
pub struct JsonCorpusRepository {
    path: PathBuf,
}

impl JsonCorpusRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CORPUS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusRepository for JsonCorpusRepository {
    async fn load(&self) -> Result<Vec<EmbeddedArticle>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound(self.path.display().to_string()));
            }
            Err(err) => {
                return Err(RepositoryError::Io(format!("{}: {err}", self.path.display())));
            }
        };

        let corpus: Vec<EmbeddedArticle> = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), articles = corpus.len(), "corpus loaded");
        Ok(corpus)
    }

    async fn save(&self, corpus: &[EmbeddedArticle]) -> Result<(), RepositoryError> {
        write_json(&self.path, corpus).await?;
        tracing::info!(path = %self.path.display(), articles = corpus.len(), "corpus saved");
        Ok(())
    }
}
