//! Shared HTTP client for the OpenAI API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};

use newschat_types::llm::LlmError;

/// Connection setup timeout. Streams have no overall timeout because a long
/// reply can legitimately take minutes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

// OpenAiClient intentionally does NOT derive Debug so the API key can never
// end up in log output.

impl OpenAiClient {
    /// Create a client for `base_url` (e.g., `https://api.openai.com/v1`).
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `chat/completions`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticated POST request builder for `path`.
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
    }
}

/// Pass successful responses through; turn error statuses into [`LlmError`].
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after_ms = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs * 1000);
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, body = %body, "OpenAI API error response");

    Err(map_status(status.as_u16(), body, retry_after_ms))
}

/// Map a non-success HTTP status to an [`LlmError`].
pub(crate) fn map_status(status: u16, body: String, retry_after_ms: Option<u64>) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited { retry_after_ms },
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}

/// Map a reqwest send/read failure to a transport error.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> LlmError {
    LlmError::Transport(format!("{context}: {err}"))
}
