//! Byte stream to line stream adapter for streamed chat completions.
//!
//! The response body arrives in arbitrary chunks; a line (and a UTF-8
//! sequence) may be split across two chunks. [`LineDecoder`] buffers bytes
//! and only decodes complete lines. Interpreting the lines is left to the
//! aggregator in `newschat-core`.

use futures_util::StreamExt;

use newschat_core::llm::provider::LineStream;
use newschat_observe::genai_attrs::HTTP_RESPONSE_STATUS_CODE;
use newschat_types::llm::LlmError;

use super::client::{check_status, transport_error};

/// Splits a byte stream into `\n`-terminated lines. A trailing `\r` is
/// stripped from each line. Blank lines are kept.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already known to contain no `\n`.
    scanned: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every line it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|b| *b == b'\n') {
            let pos = self.scanned + offset;
            self.scanned = 0;
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        self.scanned = self.buffer.len();
        lines
    }

    /// The unterminated remainder, if any, once the body has ended.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut rest = self.buffer;
        if rest.last() == Some(&b'\r') {
            rest.pop();
        }
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Send `request` and stream the response body as lines.
///
/// The HTTP status is recorded on `span`; errors are reported as the first
/// (and only) stream item.
pub fn create_line_stream(request: reqwest::RequestBuilder, span: tracing::Span) -> LineStream {
    Box::pin(async_stream::try_stream! {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error("HTTP request failed", e))?;

        span.record(HTTP_RESPONSE_STATUS_CODE, response.status().as_u16());
        let response = check_status(response).await?;

        let mut byte_stream = response.bytes_stream();
        let mut decoder = LineDecoder::new();
        let mut line_count: usize = 0;

        while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk.map_err(|e| transport_error("response body read", e))?;
            for line in decoder.push(&chunk) {
                line_count += 1;
                yield line;
            }
        }

        if let Some(rest) = decoder.finish() {
            line_count += 1;
            yield rest;
        }

        span.in_scope(|| tracing::debug!(lines = line_count, "completion stream closed"));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = LineDecoder::new();
        assert!(decoder.push(b"data: {\"a\"").is_empty());
        assert_eq!(decoder.push(b": 1}\n\ndata: [DO"), vec!["data: {\"a\": 1}", ""]);
        assert_eq!(decoder.push(b"NE]\n"), vec!["data: [DONE]"]);
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_crlf_stripped() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.push(b"one\r\ntwo\r\n"), vec!["one", "two"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let bytes = "café\n".as_bytes();
        let split = bytes.len() - 2;
        let mut decoder = LineDecoder::new();
        assert!(decoder.push(&bytes[..split]).is_empty());
        assert_eq!(decoder.push(&bytes[split..]), vec!["café"]);
    }

    #[test]
    fn test_long_line_in_single_byte_chunks() {
        let line = format!("data: {}", "x".repeat(4096));
        let mut decoder = LineDecoder::new();
        for byte in line.as_bytes() {
            assert!(decoder.push(std::slice::from_ref(byte)).is_empty());
        }
        assert_eq!(decoder.push(b"\nnext\n"), vec![line, "next".to_string()]);
        assert_eq!(decoder.push(b"tail"), Vec::<String>::new());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
    }

    #[test]
    fn test_unterminated_remainder() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.push(b"a\nb"), vec!["a"]);
        assert_eq!(decoder.finish(), Some("b".to_string()));
    }
}
