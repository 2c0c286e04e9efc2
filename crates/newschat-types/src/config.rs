//! Global configuration types for newschat.
//!
//! `GlobalConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty or missing file is a
//! valid configuration.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::Temperature;

/// What the context assembler does with the first article that does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Leave the overflowing article out entirely.
    #[default]
    Skip,
    /// Cut the overflowing article to the remaining budget.
    Truncate,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Skip => write!(f, "skip"),
            OverflowPolicy::Truncate => write!(f, "truncate"),
        }
    }
}

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Chat-completion model identifier.
    pub chat_model: String,

    /// Embedding model identifier.
    pub embedding_model: String,

    /// Base URL of the OpenAI-compatible API.
    pub openai_base_url: String,

    /// Base URL of the World News API.
    pub news_base_url: String,

    /// Character budget for article bodies in the reference block
    /// (about 2500 tokens of English text at the default).
    pub reference_budget_chars: usize,

    pub overflow_policy: OverflowPolicy,

    /// Temperature used when `--temperature` is not given.
    pub default_temperature: Temperature,

    /// Number of articles requested per corpus build.
    pub news_count: u32,

    /// Language filter for the news search.
    pub news_language: String,

    /// Oldest publish date accepted by the news search.
    pub news_earliest_publish_date: NaiveDateTime,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            news_base_url: "https://api.worldnewsapi.com".to_string(),
            reference_budget_chars: 10_000,
            overflow_policy: OverflowPolicy::Skip,
            default_temperature: Temperature::default(),
            news_count: 100,
            news_language: "en".to_string(),
            news_earliest_publish_date: default_earliest_publish_date(),
        }
    }
}

fn default_earliest_publish_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 5, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
