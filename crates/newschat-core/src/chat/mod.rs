//! Chat turn orchestration for newschat.
//!
//! `ChatSession` owns the conversation for one interactive session and runs
//! each turn end to end: retrieval on the first turn, the streamed completion,
//! and the commit of the finished exchange.

pub mod session;
