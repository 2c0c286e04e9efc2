//! Interactive CLI chat over the embedded news corpus.
//!
//! Streams replies token by token, supports slash commands and rewrites the
//! chat log after every completed turn. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
