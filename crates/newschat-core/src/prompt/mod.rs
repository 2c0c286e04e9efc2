//! Prompt construction for the first turn of a chat session.
//!
//! - `assembler`: greedy, budget-bounded selection of ranked article bodies
//! - `composer`: system instruction + reference block + question

pub mod assembler;
pub mod composer;
