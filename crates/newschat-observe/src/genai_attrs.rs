//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! `tracing` macros need literal field names at the declaration site, so
//! spans declare `gen_ai.*` fields inline. Only fields declared as
//! `tracing::field::Empty` and filled in later with
//! `Span::record(CONSTANT, value)` have a constant here, along with the
//! attribute values.

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The HTTP status returned by the provider.
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";

// --- Operation name values ---

/// Streamed chat completion.
pub const OP_CHAT: &str = "chat";

/// Text embedding.
pub const OP_EMBEDDINGS: &str = "embeddings";

/// Provider name for the OpenAI API and compatible servers.
pub const PROVIDER_OPENAI: &str = "openai";
