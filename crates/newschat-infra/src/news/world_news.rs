//! World News API client (`GET {base}/search-news`).
//!
//! The API key travels as the `api-key` query parameter, so request errors
//! are stripped of their URL before being reported.

use chrono::NaiveDateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use newschat_core::corpus::source::NewsSource;
use newschat_types::article::Article;
use newschat_types::config::GlobalConfig;
use newschat_types::error::NewsError;

/// Format of the `earliest-publish-date` query parameter.
const PUBLISH_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed search filters applied to every keyword search.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub language: String,
    pub number: u32,
    pub earliest_publish_date: NaiveDateTime,
}

impl NewsQuery {
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            language: config.news_language.clone(),
            number: config.news_count,
            earliest_publish_date: config.news_earliest_publish_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchNewsResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    publish_date: Option<String>,
}

impl From<NewsItem> for Article {
    fn from(item: NewsItem) -> Self {
        Article {
            title: item.title.unwrap_or_default(),
            text: item.text.unwrap_or_default(),
            publish_date: item.publish_date.unwrap_or_default(),
        }
    }
}

pub struct WorldNewsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    query: NewsQuery,
}

impl WorldNewsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        query: NewsQuery,
    ) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| NewsError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            query,
        })
    }
}

impl NewsSource for WorldNewsClient {
    async fn search(&self, keyword: &str) -> Result<Vec<Article>, NewsError> {
        let url = format!("{}/search-news", self.base_url);
        let earliest = self
            .query
            .earliest_publish_date
            .format(PUBLISH_DATE_FORMAT)
            .to_string();
        let number = self.query.number.to_string();

        tracing::debug!(url = %url, keyword, number = %number, earliest = %earliest, "news search request");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("text", keyword),
                ("language", self.query.language.as_str()),
                ("number", number.as_str()),
                ("earliest-publish-date", earliest.as_str()),
                ("api-key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| NewsError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "World News API error response");
            return Err(NewsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchNewsResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Deserialization(e.without_url().to_string()))?;

        let articles: Vec<Article> = parsed.news.into_iter().map(Article::from).collect();
        tracing::info!(keyword, count = articles.len(), "news search complete");
        Ok(articles)
    }
}
