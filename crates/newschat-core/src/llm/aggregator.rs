//! Streamed reply reconstruction.
//!
//! A small state machine over transport lines:
//!
//! ```text
//! ReadLine -> TryParseFrame -> Skip   (Control, Unparseable)
//!                           -> Emit   (Delta: echo, then retain)
//!                           -> Finish (Done)
//! ```
//!
//! Transport noise never aborts aggregation; only a transport error from the
//! underlying stream does. Lines are consumed strictly one at a time, so
//! deltas are concatenated in arrival order.

use futures_util::{Stream, StreamExt};

use newschat_types::llm::LlmError;
use newschat_types::stream::StreamFrame;

/// Outcome of feeding one line to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A delta was echoed and retained.
    Emitted,
    /// The line carried no text (control frame or transport noise).
    Skipped,
    /// The end-of-stream sentinel was seen; later lines are ignored.
    Finished,
}

/// Accumulates text deltas from a line-oriented completion stream.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    deltas: Vec<String>,
    skipped: usize,
    finished: bool,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport line.
    ///
    /// A textual delta is passed to `on_delta` before it is retained.
    pub fn feed(&mut self, line: &str, on_delta: &mut impl FnMut(&str)) -> Step {
        if self.finished {
            return Step::Finished;
        }

        match StreamFrame::parse(line) {
            StreamFrame::Delta(text) => {
                on_delta(&text);
                self.deltas.push(text);
                Step::Emitted
            }
            StreamFrame::Control => Step::Skipped,
            StreamFrame::Unparseable => {
                tracing::trace!(line, "skipping unparseable stream line");
                self.skipped += 1;
                Step::Skipped
            }
            StreamFrame::Done => {
                self.finished = true;
                Step::Finished
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of textual deltas retained so far.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of unparseable lines skipped so far.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Concatenate all retained deltas in arrival order.
    pub fn finish(self) -> String {
        self.deltas.concat()
    }
}

/// Consume `lines` until the end sentinel or the end of the stream and
/// return the reconstructed reply.
///
/// # Errors
///
/// The first `Err` item from `lines` is returned as is; nothing collected so
/// far is returned with it.
pub async fn aggregate<S, F>(lines: S, mut on_delta: F) -> Result<String, LlmError>
where
    S: Stream<Item = Result<String, LlmError>>,
    F: FnMut(&str),
{
    let mut lines = std::pin::pin!(lines);
    let mut aggregator = StreamAggregator::new();

    while let Some(line) = lines.next().await {
        let line = line?;
        if aggregator.feed(&line, &mut on_delta) == Step::Finished {
            break;
        }
    }

    tracing::debug!(
        deltas = aggregator.delta_count(),
        skipped = aggregator.skipped_count(),
        finished = aggregator.is_finished(),
        "stream aggregated"
    );
    Ok(aggregator.finish())
}
