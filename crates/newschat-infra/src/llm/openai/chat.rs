//! Streaming chat-completion provider (`POST {base}/chat/completions`).

use std::sync::Arc;

use newschat_core::llm::provider::{CompletionProvider, LineStream};
use newschat_observe::genai_attrs::{OP_CHAT, PROVIDER_OPENAI};
use newschat_types::llm::CompletionRequest;

use super::client::OpenAiClient;
use super::streaming::create_line_stream;

pub struct OpenAiChatProvider {
    client: Arc<OpenAiClient>,
}

impl OpenAiChatProvider {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

impl CompletionProvider for OpenAiChatProvider {
    fn name(&self) -> &str {
        PROVIDER_OPENAI
    }

    fn stream_lines(&self, request: CompletionRequest) -> LineStream {
        let request = CompletionRequest {
            stream: true,
            ..request
        };

        let span = tracing::info_span!(
            "chat",
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = PROVIDER_OPENAI,
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = f64::from(request.temperature.value()),
            http.response.status_code = tracing::field::Empty,
        );
        span.in_scope(|| {
            tracing::debug!(
                url = %self.client.url("chat/completions"),
                messages = request.messages.len(),
                "chat completion request"
            )
        });

        let builder = self.client.post("chat/completions").json(&request);
        create_line_stream(builder, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use httpmock::prelude::*;
    use newschat_core::llm::aggregator::aggregate;
    use newschat_types::llm::{LlmError, Message, Temperature};
    use secrecy::SecretString;

    fn provider(base_url: &str) -> OpenAiChatProvider {
        let client = OpenAiClient::new(base_url, SecretString::from("sk-test")).unwrap();
        OpenAiChatProvider::new(Arc::new(client))
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![Message::system("sys"), Message::user("Hi")],
            temperature: Temperature::default(),
            stream: false,
        }
    }

    const SSE_BODY: &str = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" world\"},\"index\":0}]}\r\n\r\n",
        "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\",\"index\":0}]}\n\n",
        "data: [DONE]\n\n",
    );

    #[tokio::test]
    async fn streams_and_aggregates_reply() {
        let server = MockServer::start_async().await;

        let completion_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer sk-test")
                .is_true(|req| {
                    let body: serde_json::Value =
                        serde_json::from_slice(req.body().as_ref()).unwrap_or_default();
                    body["stream"] == true
                        && body["model"] == "gpt-3.5-turbo"
                        && body["messages"][1]["role"] == "user"
                        && body["messages"][1]["content"] == "Hi"
                });
            then.status(200)
                .header("content-type", "text/event-stream")
                .body(SSE_BODY);
        });

        let lines = provider(&server.base_url()).stream_lines(request());
        let mut echoed = String::new();
        let reply = aggregate(lines, |d| echoed.push_str(d)).await.unwrap();

        assert_eq!(reply, "Hello world");
        assert_eq!(echoed, "Hello world");
        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).body("{\"error\":{\"message\":\"Incorrect API key\"}}");
        });

        let mut lines = provider(&server.base_url()).stream_lines(request());
        let first = lines.next().await.unwrap();
        assert!(matches!(first, Err(LlmError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn too_many_requests_maps_to_rate_limited() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).header("retry-after", "3").body("slow down");
        });

        let err = aggregate(provider(&server.base_url()).stream_lines(request()), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::RateLimited {
                retry_after_ms: Some(3000)
            }
        ));
    }

    #[tokio::test]
    async fn server_error_maps_to_provider_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("overloaded");
        });

        let err = aggregate(provider(&server.base_url()).stream_lines(request()), |_| {})
            .await
            .unwrap_err();
        match err {
            LlmError::Provider { message } => assert!(message.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let lines = provider("http://127.0.0.1:9").stream_lines(request());
        let err = aggregate(lines, |_| {}).await.unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }
}
