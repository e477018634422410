use crate::config::KeywordValidation;
use crate::services::discovery::collect_video_ids;
use crate::services::keywords::KeywordStore;
use crate::services::youtube::{SearchRequest, YouTubeApi};
use crate::utils::parse_count;
use log::{debug, error, info};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordReport {
    pub keyword: String,
    pub result_count: u64,
    pub avg_views: f64,
}

impl KeywordReport {
    pub fn passes(&self, criteria: &KeywordValidation) -> bool {
        self.result_count >= criteria.min_results && self.avg_views >= criteria.min_avg_views
    }
}

fn validation_request(keyword: &str, top_n: u32) -> SearchRequest {
    SearchRequest {
        query: keyword.to_string(),
        part: "id".to_string(),
        kind: "video".to_string(),
        order: "relevance".to_string(),
        published_after: None,
        relevance_language: None,
        max_results: top_n,
    }
}

/// Measure how a keyword performs on YouTube: total result count and the
/// average views of its top `top_n` hits. `None` if an API call fails.
pub async fn validate_keyword(api: &dyn YouTubeApi, keyword: &str, top_n: u32) -> Option<KeywordReport> {
    let search_response = match api.search(&validation_request(keyword, top_n)).await {
        Ok(response) => response,
        Err(e) => {
            error!("Keyword validation failed [{keyword}]: {e}");
            return None;
        }
    };

    let result_count = search_response["pageInfo"]["totalResults"].as_u64().unwrap_or(0);
    let video_ids = collect_video_ids(&search_response);
    if video_ids.is_empty() {
        return Some(KeywordReport {
            keyword: keyword.to_string(),
            result_count: 0,
            avg_views: 0.0,
        });
    }

    let videos_response = match api.videos(&video_ids, "statistics").await {
        Ok(response) => response,
        Err(e) => {
            error!("Keyword validation failed [{keyword}]: {e}");
            return None;
        }
    };

    let views: anyhow::Result<Vec<u64>> = videos_response["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| parse_count(&item["statistics"]["viewCount"]))
                .collect()
        })
        .unwrap_or_else(|| Ok(Vec::new()));
    let views = match views {
        Ok(views) => views,
        Err(e) => {
            error!("Keyword validation failed [{keyword}]: {e:#}");
            return None;
        }
    };

    let avg_views = if views.is_empty() {
        0.0
    } else {
        views.iter().sum::<u64>() as f64 / views.len() as f64
    };

    Some(KeywordReport {
        keyword: keyword.to_string(),
        result_count,
        avg_views,
    })
}

/// Keep only keywords that clear the thresholds; empty categories are dropped.
pub async fn validate_keywords(
    api: &dyn YouTubeApi,
    candidates: &KeywordStore,
    criteria: &KeywordValidation,
) -> KeywordStore {
    let mut validated = BTreeMap::new();
    let mut total_checked = 0;
    let mut total_passed = 0;

    for (category, keywords) in candidates.as_map() {
        let mut passed = Vec::new();
        for keyword in keywords {
            total_checked += 1;
            let Some(report) = validate_keyword(api, keyword, criteria.top_n_for_avg).await else {
                continue;
            };
            if report.passes(criteria) {
                info!(
                    "  PASS [{category}] '{keyword}' - {} results, avg views {:.0}",
                    report.result_count, report.avg_views
                );
                passed.push(keyword.clone());
                total_passed += 1;
            } else {
                debug!(
                    "  FAIL [{category}] '{keyword}' - {} results, avg views {:.0}",
                    report.result_count, report.avg_views
                );
            }
        }
        if !passed.is_empty() {
            validated.insert(category.clone(), passed);
        }
    }

    info!("Keyword validation done: {total_passed} of {total_checked} passed");
    KeywordStore::new(validated)
}
