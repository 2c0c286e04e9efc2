//! CompletionProvider trait definition.
//!
//! Providers only own the transport: they send the request and hand back the
//! response body split into lines. Interpreting those lines is the job of
//! [`super::aggregator`], so every provider gets the same skip-malformed
//! behavior.

use std::pin::Pin;

use futures_util::Stream;

use newschat_types::llm::{CompletionRequest, LlmError};

/// Boxed stream of transport lines, in arrival order.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Trait for streaming chat-completion backends.
///
/// Implementations live in newschat-infra (e.g., `OpenAiChatProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request.
    ///
    /// Connection and HTTP status failures surface as the first stream item.
    /// Read failures mid-body surface as [`LlmError::Transport`] items.
    fn stream_lines(&self, request: CompletionRequest) -> LineStream;
}
