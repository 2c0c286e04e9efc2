//! Application state shared by the CLI commands.
//!
//! Holds the configuration and the JSON repositories of the resolved data
//! directory. The HTTP adapters are built on demand, so each command only
//! asks for the credentials it actually needs.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use newschat_core::repository::corpus::CorpusRepository;
use newschat_core::retrieval::store::VectorStore;
use newschat_infra::config::load_global_config;
use newschat_infra::filesystem::chat_log::JsonChatLogRepository;
use newschat_infra::filesystem::corpus::JsonCorpusRepository;
use newschat_infra::filesystem::resolve_data_dir;
use newschat_infra::llm::openai::{OpenAiChatProvider, OpenAiClient, OpenAiEmbedder};
use newschat_infra::news::{NewsQuery, WorldNewsClient};
use newschat_infra::secret::env::{EnvCredentials, NEWS_API_KEY, OPENAI_API_KEY};
use newschat_types::config::GlobalConfig;
use newschat_types::error::RepositoryError;

pub struct AppState {
    pub config: GlobalConfig,
    pub credentials: EnvCredentials,
    pub corpus_repo: JsonCorpusRepository,
    pub chat_log_repo: JsonChatLogRepository,
}

impl AppState {
    /// Resolve the data directory, make sure it exists and load `config.toml`.
    pub async fn init(explicit_data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(explicit_data_dir);

        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), ?config, "application state initialized");

        Ok(Self {
            corpus_repo: JsonCorpusRepository::new(&data_dir),
            chat_log_repo: JsonChatLogRepository::new(&data_dir),
            config,
            credentials: EnvCredentials::new(),
        })
    }

    /// OpenAI client shared by the chat provider and the embedder.
    pub fn openai_client(&self) -> anyhow::Result<Arc<OpenAiClient>> {
        let api_key = self.credentials.require(OPENAI_API_KEY)?;
        let client = OpenAiClient::new(&self.config.openai_base_url, api_key)?;
        Ok(Arc::new(client))
    }

    pub fn chat_provider(&self, client: Arc<OpenAiClient>) -> OpenAiChatProvider {
        OpenAiChatProvider::new(client)
    }

    pub fn embedder(&self, client: Arc<OpenAiClient>) -> OpenAiEmbedder {
        OpenAiEmbedder::new(client, &self.config.embedding_model)
    }

    pub fn news_client(&self) -> anyhow::Result<WorldNewsClient> {
        let api_key = self.credentials.require(NEWS_API_KEY)?;
        let client = WorldNewsClient::new(
            &self.config.news_base_url,
            api_key,
            NewsQuery::from_config(&self.config),
        )?;
        Ok(client)
    }

    /// Load the embedded corpus into a vector store.
    pub async fn load_store(&self) -> anyhow::Result<Arc<VectorStore>> {
        match self.corpus_repo.load().await {
            Ok(items) => {
                let store = VectorStore::new(items);
                tracing::info!(
                    articles = store.len(),
                    dimension = ?store.dimension(),
                    "vector store loaded"
                );
                Ok(Arc::new(store))
            }
            Err(RepositoryError::NotFound(path)) => Err(anyhow::anyhow!(
                "no corpus found at {path}. Build one first with: newschat build-corpus --keyword <KEYWORD>"
            )),
            Err(e) => Err(e).context("failed to load corpus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn init_creates_data_dir_and_uses_default_config() {
        let tmp = tempdir().unwrap();
        let data_dir = tmp.path().join("fresh");

        let state = AppState::init(Some(&data_dir)).await.unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(state.config.reference_budget_chars, 10_000);
        assert_eq!(state.corpus_repo.path(), data_dir.join("news_with_embeddings.json"));
    }

    #[tokio::test]
    async fn load_store_without_corpus_explains_next_step() {
        let tmp = tempdir().unwrap();
        let state = AppState::init(Some(tmp.path())).await.unwrap();

        let err = state.load_store().await.unwrap_err();
        assert!(err.to_string().contains("newschat build-corpus"));
    }
}
