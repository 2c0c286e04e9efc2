//! Completion service abstractions for newschat.
//!
//! - `CompletionProvider`: port trait returning the raw line stream of a reply
//! - `aggregator`: reconstructs the reply text from that line stream

pub mod aggregator;
pub mod provider;
