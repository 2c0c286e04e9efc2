//! Credential lookup.
//!
//! API keys are read from the environment only and handed out wrapped in
//! [`secrecy::SecretString`].

pub mod env;
