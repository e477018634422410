use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref DURATION_RE: Regex =
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration regex");
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Parse an ISO-8601 timestamp (`2024-01-31T12:00:00Z`) into UTC.
pub fn parse_published_at(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an ISO-8601 duration (PT1H2M30S) into fractional minutes.
///
/// Only the leading `PT[nH][nM][nS]` shape is recognised; anything else is 0.
pub fn parse_iso8601_duration_to_minutes(duration_str: &str) -> f64 {
    let Some(captures) = DURATION_RE.captures(duration_str) else {
        return 0.0;
    };

    let component = |idx: usize| -> f64 {
        captures
            .get(idx)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    component(1) * 60.0 + component(2) + component(3) / 60.0
}

/// Coerce a YouTube statistics counter. Absent counters are 0.
pub fn parse_count(value: &Value) -> Result<u64> {
    match value {
        Value::Null => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("invalid count {s:?}: {e}")),
        Value::Number(n) => n.as_u64().ok_or_else(|| anyhow!("invalid count {n}")),
        other => bail!("invalid count {other}"),
    }
}

/// Seconds to `MM:SS`; minutes are not wrapped into hours.
pub fn seconds_to_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn chunk_chars(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Strip a surrounding markdown code fence (```json ... ```) from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => return "",
    };
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Accepts a watch URL, a short link or a bare video id.
pub fn extract_youtube_video_id(input: &str) -> String {
    use url::Url;

    let input = input.trim();
    if !(input.contains("youtube.com") || input.contains("youtu.be")) {
        return input.to_string();
    }

    let Ok(parsed_url) = Url::parse(input) else {
        return input.to_string();
    };

    let id = match parsed_url.host_str() {
        Some("youtu.be") => parsed_url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(|id| id.to_string()),
        Some(_) => parsed_url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.to_string()),
        None => None,
    };

    id.filter(|id| !id.is_empty())
        .unwrap_or_else(|| input.to_string())
}
