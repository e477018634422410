use crate::config::{DiscoveryFilters, ScoringWeights};
use crate::models::{ParsedVideo, RankedResultSet, VideoCandidate};
use crate::services::scoring::{passes_filter, rank_videos, score_video};
use crate::services::youtube::{SearchRequest, YouTubeApi};
use crate::utils::parse_count;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use serde_json::Value;
use std::sync::Arc;

/// Upper bound YouTube accepts for `maxResults` on a single search page.
pub const MAX_RESULTS_CAP: u32 = 50;

const DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

pub fn build_search_request(
    keyword: &str,
    max_results: u32,
    published_after: Option<DateTime<Utc>>,
    filters: &DiscoveryFilters,
    now: DateTime<Utc>,
) -> SearchRequest {
    let published_after =
        published_after.unwrap_or_else(|| now - Duration::days(filters.max_age_days));

    SearchRequest {
        query: keyword.to_string(),
        part: "id,snippet".to_string(),
        kind: "video".to_string(),
        order: "relevance".to_string(),
        published_after: Some(published_after),
        relevance_language: Some(filters.language.clone()),
        max_results: max_results.clamp(1, MAX_RESULTS_CAP),
    }
}

/// Video ids of a `search.list` response, in response order.
/// Items without a video id (channels, playlists) are dropped.
pub fn collect_video_ids(search_response: &Value) -> Vec<String> {
    search_response["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"]["videoId"].as_str())
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Map one `videos.list` item. Missing text fields default to empty,
/// absent counters to 0; a missing id or snippet, or a non-numeric counter,
/// is an error.
pub fn parse_video_item(item: &Value, keyword: &str) -> Result<VideoCandidate> {
    let video_id = item["id"]
        .as_str()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| anyhow!("missing video id"))?;
    let snippet = item
        .get("snippet")
        .filter(|s| s.is_object())
        .ok_or_else(|| anyhow!("missing snippet for {video_id}"))?;
    let stats = &item["statistics"];

    Ok(VideoCandidate {
        video_id: video_id.to_string(),
        title: snippet["title"].as_str().unwrap_or("").to_string(),
        channel_name: snippet["channelTitle"].as_str().unwrap_or("").to_string(),
        channel_id: snippet["channelId"].as_str().unwrap_or("").to_string(),
        description: snippet["description"].as_str().unwrap_or("").to_string(),
        published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
        thumbnail: snippet["thumbnails"]["high"]["url"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        views: parse_count(&stats["viewCount"]).context("viewCount")?,
        likes: parse_count(&stats["likeCount"]).context("likeCount")?,
        comment_count: parse_count(&stats["commentCount"]).context("commentCount")?,
        duration: item["contentDetails"]["duration"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        keyword: keyword.to_string(),
    })
}

/// Keyword search → detail lookup → filter → score → rank.
pub struct VideoDiscovery {
    api: Arc<dyn YouTubeApi>,
    filters: DiscoveryFilters,
    weights: ScoringWeights,
}

impl VideoDiscovery {
    pub fn new(api: Arc<dyn YouTubeApi>) -> Self {
        Self {
            api,
            filters: DiscoveryFilters::default(),
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_filters(mut self, filters: DiscoveryFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub async fn search_videos(
        &self,
        keyword: &str,
        max_results: Option<u32>,
        published_after: Option<DateTime<Utc>>,
    ) -> RankedResultSet {
        self.search_videos_at(keyword, max_results, published_after, Utc::now())
            .await
    }

    /// Never fails: API errors are logged and yield an empty result so the
    /// caller can move on to its next keyword.
    pub async fn search_videos_at(
        &self,
        keyword: &str,
        max_results: Option<u32>,
        published_after: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> RankedResultSet {
        let max_results = max_results.unwrap_or(self.filters.max_results_per_keyword);
        let request = build_search_request(keyword, max_results, published_after, &self.filters, now);

        let search_response = match self.api.search(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("YouTube search failed [{keyword}]: {e}");
                return Vec::new();
            }
        };

        let video_ids = collect_video_ids(&search_response);
        if video_ids.is_empty() {
            info!("No search results: {keyword}");
            return Vec::new();
        }

        let videos_response = match self.api.videos(&video_ids, DETAIL_PARTS).await {
            Ok(response) => response,
            Err(e) => {
                error!("Video detail lookup failed [{keyword}]: {e}");
                return Vec::new();
            }
        };

        let items = videos_response["items"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let mut results = Vec::new();
        for item in items {
            let candidate = match parse_video_item(item, keyword) {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!("Skipping video that failed to parse: {e:#}");
                    continue;
                }
            };

            let parsed = ParsedVideo::new(candidate);
            if passes_filter(&parsed, &self.filters) {
                results.push(score_video(parsed, &self.weights, now));
            }
        }

        rank_videos(&mut results);
        info!(
            "[{keyword}] searched {} -> {} passed filter",
            video_ids.len(),
            results.len()
        );
        results
    }
}

/// Title of a single video, used when a script is requested for a bare id.
pub async fn fetch_video_title(api: &dyn YouTubeApi, video_id: &str) -> Option<String> {
    match api.videos(&[video_id.to_string()], "snippet").await {
        Ok(response) => response["items"][0]["snippet"]["title"]
            .as_str()
            .map(String::from),
        Err(e) => {
            warn!("Failed to fetch title for video {video_id}: {e}");
            None
        }
    }
}
