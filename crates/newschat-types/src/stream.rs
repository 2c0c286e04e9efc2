//! Stream frame classification for line-oriented completion transports.
//!
//! Every line read from the completion service is classified into exactly
//! one [`StreamFrame`]. Only [`StreamFrame::Delta`] contributes text to the
//! reconstructed reply; the other variants are consumed without effect.

use serde::Deserialize;

/// Sentinel payload the completion service sends after the last frame.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Prefix of server-sent-event data lines.
pub const DATA_PREFIX: &str = "data:";

/// One classified line of a streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// A parsed frame carrying a textual delta (possibly empty).
    Delta(String),
    /// A parsed frame without textual payload (role announcement, finish reason).
    Control,
    /// The end-of-stream sentinel.
    Done,
    /// Anything that is not a frame: malformed JSON, keep-alive comments, blank lines.
    Unparseable,
}

impl StreamFrame {
    /// Classify a single transport line.
    ///
    /// An optional `data:` prefix is stripped before parsing. Never fails:
    /// lines that are not valid frames become [`StreamFrame::Unparseable`].
    pub fn parse(line: &str) -> Self {
        let payload = line.trim();
        let payload = payload
            .strip_prefix(DATA_PREFIX)
            .map(str::trim_start)
            .unwrap_or(payload);

        if payload == DONE_SENTINEL {
            return StreamFrame::Done;
        }
        if payload.is_empty() {
            return StreamFrame::Unparseable;
        }

        match serde_json::from_str::<ChunkPayload>(payload) {
            Ok(chunk) => match chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
                Some(text) => StreamFrame::Delta(text),
                None => StreamFrame::Control,
            },
            Err(_) => StreamFrame::Unparseable,
        }
    }
}

/// `chat.completion.chunk` payload, reduced to the fields frames need.
#[derive(Debug, Deserialize)]
struct ChunkPayload {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}
