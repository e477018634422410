use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("YouTube request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("YouTube API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Parameters of a `search.list` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub part: String,
    pub kind: String,
    pub order: String,
    pub published_after: Option<DateTime<Utc>>,
    pub relevance_language: Option<String>,
    pub max_results: u32,
}

impl SearchRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("part", self.part.clone()),
            ("type", self.kind.clone()),
            ("order", self.order.clone()),
            ("maxResults", self.max_results.to_string()),
        ];
        if let Some(published_after) = self.published_after {
            pairs.push((
                "publishedAfter",
                published_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(language) = &self.relevance_language {
            pairs.push(("relevanceLanguage", language.clone()));
        }
        pairs
    }
}

/// The two YouTube Data API endpoints discovery depends on.
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// `search.list`; returns the raw response body.
    async fn search(&self, request: &SearchRequest) -> Result<Value, DiscoveryError>;

    /// `videos.list` for the given ids; returns the raw response body.
    async fn videos(&self, ids: &[String], part: &str) -> Result<Value, DiscoveryError>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: YOUTUBE_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn get(&self, endpoint: &str, pairs: &[(&str, String)]) -> Result<Value, DiscoveryError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}", self.base_url))
            .query(pairs)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    // Documentation: https://developers.google.com/youtube/v3/docs/search/list
    async fn search(&self, request: &SearchRequest) -> Result<Value, DiscoveryError> {
        self.get("search", &request.query_pairs()).await
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
    async fn videos(&self, ids: &[String], part: &str) -> Result<Value, DiscoveryError> {
        let pairs = [("id", ids.join(",")), ("part", part.to_string())];
        self.get("videos", &pairs).await
    }
}
