//! Embedding provider (`POST {base}/embeddings`).

use std::sync::Arc;

use tracing::Instrument;

use newschat_core::retrieval::embedder::Embedder;
use newschat_observe::genai_attrs::{
    GEN_AI_USAGE_INPUT_TOKENS, HTTP_RESPONSE_STATUS_CODE, OP_EMBEDDINGS, PROVIDER_OPENAI,
};
use newschat_types::article::Embedding;
use newschat_types::llm::LlmError;

use super::client::{check_status, transport_error, OpenAiClient};
use super::types::{EmbeddingRequest, EmbeddingResponse};

pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: Arc<OpenAiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, LlmError> {
        let span = tracing::info_span!(
            "embeddings",
            gen_ai.operation.name = OP_EMBEDDINGS,
            gen_ai.provider.name = PROVIDER_OPENAI,
            gen_ai.request.model = %self.model,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            http.response.status_code = tracing::field::Empty,
        );

        async {
            let body = EmbeddingRequest {
                input: text,
                model: &self.model,
            };

            let response = self
                .client
                .post("embeddings")
                .json(&body)
                .send()
                .await
                .map_err(|e| transport_error("HTTP request failed", e))?;

            tracing::Span::current().record(HTTP_RESPONSE_STATUS_CODE, response.status().as_u16());
            let response = check_status(response).await?;

            let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
                LlmError::Deserialization(format!("failed to parse embeddings response: {e}"))
            })?;

            let vector = parsed
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or_else(|| {
                    LlmError::Deserialization("embeddings response contained no data".to_string())
                })?;

            tracing::Span::current().record(GEN_AI_USAGE_INPUT_TOKENS, parsed.usage.total_tokens);
            tracing::trace!(dimension = vector.len(), "text embedded");

            Ok(Embedding {
                vector,
                total_tokens: parsed.usage.total_tokens,
            })
        }
        .instrument(span)
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use secrecy::SecretString;
    use serde_json::json;

    fn embedder(server: &MockServer) -> OpenAiEmbedder {
        let client = OpenAiClient::new(server.base_url(), SecretString::from("sk-test")).unwrap();
        OpenAiEmbedder::new(Arc::new(client), "text-embedding-ada-002")
    }

    #[tokio::test]
    async fn embed_returns_first_vector_and_usage() {
        let server = MockServer::start_async().await;

        let embed_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/embeddings")
                .header("Authorization", "Bearer sk-test")
                .is_true(|req| {
                    let body: serde_json::Value =
                        serde_json::from_slice(req.body().as_ref()).unwrap_or_default();
                    body == json!({"input": "Microsoft ships", "model": "text-embedding-ada-002"})
                });
            then.status(200).json_body(json!({
                "object": "list",
                "data": [{"object": "embedding", "index": 0, "embedding": [0.5, -0.25, 0.0]}],
                "model": "text-embedding-ada-002",
                "usage": {"prompt_tokens": 3, "total_tokens": 3}
            }));
        });

        let embedding = embedder(&server).embed("Microsoft ships").await.unwrap();

        assert_eq!(embedding.vector, vec![0.5, -0.25, 0.0]);
        assert_eq!(embedding.total_tokens, 3);
        embed_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn embed_empty_data_is_deserialization_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(200)
                .json_body(json!({"data": [], "usage": {"total_tokens": 0}}));
        });

        let err = embedder(&server).embed("x").await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn embed_unauthorized() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(401).body("nope");
        });

        let err = embedder(&server).embed("x").await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn model_name_is_configured_model() {
        let client = OpenAiClient::new("http://localhost", SecretString::from("k")).unwrap();
        let embedder = OpenAiEmbedder::new(Arc::new(client), "text-embedding-3-small");
        assert_eq!(embedder.model_name(), "text-embedding-3-small");
    }
}
