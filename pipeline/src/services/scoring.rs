use crate::config::{DiscoveryFilters, ScoringWeights};
use crate::models::{ParsedVideo, ScoredVideo};
use crate::utils::parse_published_at;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Recency score used when the publish date is missing or unparsable.
const DEFAULT_RECENCY_SCORE: f64 = 50.0;

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

pub fn passes_filter(video: &ParsedVideo, filters: &DiscoveryFilters) -> bool {
    video.candidate.views >= filters.min_views
        && video.duration_minutes >= filters.min_duration_minutes
        && video.duration_minutes <= filters.max_duration_minutes
}

/// Log scale: ~5k views scores 0, ~1M views scores 100.
pub fn view_score(views: u64) -> f64 {
    let views = views.max(1) as f64;
    clamp_score((views.log10() - 3.7) * 40.0)
}

pub fn like_score(likes: u64, views: u64) -> f64 {
    clamp_score(likes as f64 / views.max(1) as f64 * 2000.0)
}

pub fn comment_score(comments: u64, views: u64) -> f64 {
    clamp_score(comments as f64 / views.max(1) as f64 * 5000.0)
}

/// Loses half a point per whole day since publication.
pub fn recency_score(published_at: &str, now: DateTime<Utc>) -> f64 {
    match parse_published_at(published_at) {
        Some(published) => {
            let days_elapsed = (now - published).num_days();
            clamp_score(100.0 - days_elapsed as f64 * 0.5)
        }
        None => DEFAULT_RECENCY_SCORE,
    }
}

/// Composite relevance score in `[0, 100]`, evaluated at `now`.
pub fn calculate_score_at(
    video: &ParsedVideo,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> f64 {
    let candidate = &video.candidate;
    let score = weights.views * view_score(candidate.views)
        + weights.likes * like_score(candidate.likes, candidate.views)
        + weights.comments * comment_score(candidate.comment_count, candidate.views)
        + weights.recency * recency_score(&candidate.published_at, now);
    clamp_score(score)
}

pub fn calculate_score(video: &ParsedVideo, weights: &ScoringWeights) -> f64 {
    calculate_score_at(video, weights, Utc::now())
}

pub fn score_video(video: ParsedVideo, weights: &ScoringWeights, now: DateTime<Utc>) -> ScoredVideo {
    let score = calculate_score_at(&video, weights, now);
    ScoredVideo { video, score }
}

/// Stable sort, best score first. Ties keep their input order.
pub fn rank_videos(videos: &mut [ScoredVideo]) {
    videos.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
