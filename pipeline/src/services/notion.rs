use crate::models::{ReelsScript, ScoredVideo};
use crate::utils::{chunk_chars, truncate_chars};
use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion rejects rich_text content longer than this.
pub const RICH_TEXT_LIMIT: usize = 2000;

pub const STATUS_DISCOVERED: &str = "Discovered";
pub const STATUS_SCRIPT_READY: &str = "Script Ready";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Notion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Notion API returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[async_trait]
pub trait NotionApi: Send + Sync {
    async fn query_database(&self, filter: Value) -> Result<Value, NotionError>;
    async fn create_page(&self, properties: Value, children: Option<Vec<Value>>) -> Result<Value, NotionError>;
    async fn update_page(&self, page_id: &str, properties: Value) -> Result<Value, NotionError>;
}

pub struct NotionClient {
    client: Client,
    token: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            database_id: database_id.into(),
            base_url: NOTION_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, NotionError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(&self, filter: Value) -> Result<Value, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        self.send(self.client.post(url).json(&json!({ "filter": filter })))
            .await
    }

    async fn create_page(&self, properties: Value, children: Option<Vec<Value>>) -> Result<Value, NotionError> {
        let mut body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        });
        if let Some(children) = children {
            body["children"] = Value::Array(children);
        }
        self.send(self.client.post(format!("{}/pages", self.base_url)).json(&body))
            .await
    }

    async fn update_page(&self, page_id: &str, properties: Value) -> Result<Value, NotionError> {
        let url = format!("{}/pages/{page_id}", self.base_url);
        self.send(self.client.patch(url).json(&json!({ "properties": properties })))
            .await
    }
}

fn rich_text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

fn heading_block(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "heading_3",
        "heading_3": { "rich_text": rich_text(text) },
    })
}

fn paragraph_block(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": rich_text(text) },
    })
}

/// Page body for a script: one heading per section followed by paragraphs
/// chunked to the rich_text limit.
pub fn script_to_blocks(script: &ReelsScript) -> Vec<Value> {
    let mut blocks = Vec::new();

    for (key, section) in script.sections() {
        let mut header = format!("{} ({})", key.to_uppercase(), section.duration);
        if let Some(ts) = section.source_timestamp.as_deref().filter(|ts| !ts.is_empty()) {
            header.push_str(&format!(" [Source: {ts}]"));
        }
        blocks.push(heading_block(&header));
        for chunk in chunk_chars(&section.text, RICH_TEXT_LIMIT) {
            blocks.push(paragraph_block(&chunk));
        }
    }

    if !script.caption.is_empty() {
        blocks.push(heading_block("Caption"));
        for chunk in chunk_chars(&script.caption, RICH_TEXT_LIMIT) {
            blocks.push(paragraph_block(&chunk));
        }
    }

    if !script.hashtags.is_empty() {
        blocks.push(heading_block("Hashtags"));
        blocks.push(paragraph_block(&truncate_chars(
            &script.hashtags.joined(),
            RICH_TEXT_LIMIT,
        )));
    }

    if !script.cta_keyword.is_empty() {
        blocks.push(heading_block("CTA Keyword"));
        blocks.push(paragraph_block(&script.cta_keyword));
    }

    blocks
}

/// Database properties of a video page.
pub fn build_properties(video: &ScoredVideo, script: Option<&ReelsScript>) -> Value {
    let status = if script.is_some() {
        STATUS_SCRIPT_READY
    } else {
        STATUS_DISCOVERED
    };

    let mut properties = Map::new();
    properties.insert(
        "Title".into(),
        json!({ "title": [{ "text": { "content": truncate_chars(video.title(), 100) } }] }),
    );
    properties.insert("Status".into(), json!({ "select": { "name": status } }));
    properties.insert("YouTube URL".into(), json!({ "url": video.url() }));
    properties.insert(
        "Channel".into(),
        json!({ "rich_text": [{ "text": { "content": video.channel() } }] }),
    );
    properties.insert("Views".into(), json!({ "number": video.views() }));
    properties.insert("Likes".into(), json!({ "number": video.likes() }));
    properties.insert(
        "Relevance Score".into(),
        json!({ "number": (video.score * 10.0).round() / 10.0 }),
    );
    properties.insert(
        "Keyword".into(),
        json!({ "rich_text": [{ "text": { "content": video.keyword() } }] }),
    );

    if let Some(script) = script.filter(|s| !s.cta_keyword.is_empty()) {
        properties.insert(
            "CTA Keyword".into(),
            json!({ "rich_text": [{ "text": { "content": truncate_chars(&script.cta_keyword, 200) } }] }),
        );
    }

    Value::Object(properties)
}

pub struct NotionWriter {
    api: Arc<dyn NotionApi>,
}

impl NotionWriter {
    pub fn new(api: Arc<dyn NotionApi>) -> Self {
        Self { api }
    }

    /// True when a page already links to this video. Lookup failures count
    /// as "not a duplicate".
    pub async fn check_duplicate(&self, video_id: &str) -> bool {
        let filter = json!({
            "property": "YouTube URL",
            "url": { "contains": video_id },
        });
        match self.api.query_database(filter).await {
            Ok(response) => response["results"]
                .as_array()
                .map(|results| !results.is_empty())
                .unwrap_or(false),
            Err(e) => {
                error!("Notion duplicate check failed: {e}");
                false
            }
        }
    }

    /// Create a page for the video. Returns the new page id, or `None` when
    /// the video is already stored or the request failed.
    pub async fn save_video(&self, video: &ScoredVideo, script: Option<&ReelsScript>) -> Option<String> {
        if self.check_duplicate(video.id()).await {
            info!("Skipping duplicate video: {}", video.id());
            return None;
        }

        let properties = build_properties(video, script);
        let children = script.map(script_to_blocks);

        match self.api.create_page(properties, children).await {
            Ok(page) => {
                let Some(page_id) = page["id"].as_str().filter(|id| !id.is_empty()) else {
                    error!("Notion create response has no page id: {page}");
                    return None;
                };
                info!(
                    "Saved to Notion: {} -> {page_id}",
                    truncate_chars(video.title(), 50)
                );
                Some(page_id.to_string())
            }
            Err(e) => {
                error!("Failed to save video to Notion: {e}");
                None
            }
        }
    }

    pub async fn update_status(&self, page_id: &str, status: &str) -> bool {
        let properties = json!({ "Status": { "select": { "name": status } } });
        match self.api.update_page(page_id, properties).await {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to update status of page {page_id}: {e}");
                false
            }
        }
    }
}
