#![allow(dead_code)]

use async_trait::async_trait;
use reel_scout::models::TranscriptSegment;
use reel_scout::services::generative::{GenerationError, GenerativeModel};
use reel_scout::services::notion::{NotionApi, NotionError};
use reel_scout::services::transcript::TranscriptSource;
use reel_scout::services::youtube::{DiscoveryError, SearchRequest, YouTubeApi};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One `videos.list` item.
pub fn video_item(id: &str, views: u64, duration: &str, published_at: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": format!("Video {id}"),
            "channelTitle": "Some Channel",
            "channelId": "UC123",
            "description": "desc",
            "publishedAt": published_at,
            "thumbnails": { "high": { "url": format!("https://i.ytimg.com/vi/{id}/hq.jpg") } }
        },
        "statistics": {
            "viewCount": views.to_string(),
            "likeCount": "0",
            "commentCount": "0"
        },
        "contentDetails": { "duration": duration }
    })
}

/// A `search.list` response listing the given video ids.
pub fn search_response(ids: &[&str]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": { "kind": "youtube#video", "videoId": id } }))
        .collect();
    json!({ "pageInfo": { "totalResults": ids.len() }, "items": items })
}

pub fn api_error(status: u16) -> DiscoveryError {
    DiscoveryError::Api {
        status,
        body: "boom".to_string(),
    }
}

/// Scripted YouTube API. Empty queues answer with no items.
#[derive(Default)]
pub struct FakeYouTube {
    search_responses: Mutex<VecDeque<Result<Value, DiscoveryError>>>,
    video_responses: Mutex<VecDeque<Result<Value, DiscoveryError>>>,
    pub requests: Mutex<Vec<SearchRequest>>,
    pub video_ids: Mutex<Vec<Vec<String>>>,
    search_calls: AtomicUsize,
    video_calls: AtomicUsize,
}

impl FakeYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_search(&self, response: Result<Value, DiscoveryError>) {
        self.search_responses.lock().unwrap().push_back(response);
    }

    pub fn push_videos(&self, response: Result<Value, DiscoveryError>) {
        self.video_responses.lock().unwrap().push_back(response);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn video_calls(&self) -> usize {
        self.video_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl YouTubeApi for FakeYouTube {
    async fn search(&self, request: &SearchRequest) -> Result<Value, DiscoveryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "items": [] })))
    }

    async fn videos(&self, ids: &[String], _part: &str) -> Result<Value, DiscoveryError> {
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        self.video_ids.lock().unwrap().push(ids.to_vec());
        self.video_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "items": [] })))
    }
}

/// Scripted model; an empty queue is an empty response.
#[derive(Default)]
pub struct FakeModel {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<String, GenerationError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }
}

/// Records created pages; `existing` holds video ids already in the database.
#[derive(Default)]
pub struct FakeNotion {
    pub existing: Mutex<Vec<String>>,
    pub created: Mutex<Vec<(Value, Option<Vec<Value>>)>>,
    pub updated: Mutex<Vec<(String, Value)>>,
    pub fail_create: bool,
    pub omit_page_id: bool,
}

impl FakeNotion {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotionApi for FakeNotion {
    async fn query_database(&self, filter: Value) -> Result<Value, NotionError> {
        let needle = filter["url"]["contains"].as_str().unwrap_or("").to_string();
        let results: Vec<Value> = self
            .existing
            .lock()
            .unwrap()
            .iter()
            .filter(|id| **id == needle)
            .map(|id| json!({ "id": format!("page-{id}") }))
            .collect();
        Ok(json!({ "results": results }))
    }

    async fn create_page(
        &self,
        properties: Value,
        children: Option<Vec<Value>>,
    ) -> Result<Value, NotionError> {
        if self.fail_create {
            return Err(NotionError::Api {
                status: 400,
                body: "validation_error".to_string(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push((properties, children));
        if self.omit_page_id {
            return Ok(json!({ "object": "page" }));
        }
        Ok(json!({ "id": format!("page-{}", created.len()) }))
    }

    async fn update_page(&self, page_id: &str, properties: Value) -> Result<Value, NotionError> {
        self.updated
            .lock()
            .unwrap()
            .push((page_id.to_string(), properties));
        Ok(json!({ "id": page_id }))
    }
}

/// Transcripts keyed by video id; unknown ids fail.
#[derive(Default)]
pub struct FakeTranscripts {
    pub transcripts: HashMap<String, Vec<TranscriptSegment>>,
}

impl FakeTranscripts {
    pub fn with(mut self, video_id: &str, text: &str) -> Self {
        self.transcripts.insert(
            video_id.to_string(),
            vec![TranscriptSegment {
                start: 0.0,
                duration: 3.0,
                text: text.to_string(),
            }],
        );
        self
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_segments(
        &self,
        video_id: &str,
        _languages: &[&str],
    ) -> anyhow::Result<Vec<TranscriptSegment>> {
        self.transcripts
            .get(video_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("transcripts disabled for {video_id}"))
    }
}
