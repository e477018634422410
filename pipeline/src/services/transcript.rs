use crate::models::TranscriptSegment;
use crate::utils::seconds_to_timestamp;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info};
use yt_transcript_rs::api::YouTubeTranscriptApi;

pub const DEFAULT_LANGUAGES: &[&str] = &["en"];

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_segments(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<Vec<TranscriptSegment>>;
}

/// Captions scraped from the public watch page via `yt-transcript-rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YtTranscriptSource;

#[async_trait]
impl TranscriptSource for YtTranscriptSource {
    async fn fetch_segments(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<Vec<TranscriptSegment>> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| anyhow!("failed to create YouTubeTranscriptApi: {e}"))?;

        let transcript = api
            .fetch_transcript(video_id, languages, false)
            .await
            .map_err(|e| anyhow!("{e}"))?;

        let segments: Vec<TranscriptSegment> = transcript
            .parts()
            .iter()
            .map(|part| TranscriptSegment {
                start: part.start,
                duration: part.duration,
                text: part.text.clone(),
            })
            .collect();
        info!("Fetched {} captions for video ID: {video_id}", segments.len());
        Ok(segments)
    }
}

/// `[MM:SS] text` per segment, or plain space-joined text.
pub fn format_transcript(segments: &[TranscriptSegment], include_timestamps: bool) -> String {
    if include_timestamps {
        segments
            .iter()
            .map(|s| format!("[{}] {}", seconds_to_timestamp(s.start), s.text.replace('\n', " ")))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        segments
            .iter()
            .map(|s| s.text.replace('\n', " "))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub async fn extract_transcript(
    source: &dyn TranscriptSource,
    video_id: &str,
    languages: &[&str],
    include_timestamps: bool,
) -> Option<String> {
    match source.fetch_segments(video_id, languages).await {
        Ok(segments) => Some(format_transcript(&segments, include_timestamps)),
        Err(e) => {
            error!("Failed to fetch transcript for video ID {video_id}: {e:?}");
            None
        }
    }
}

pub async fn extract_transcript_with_segments(
    source: &dyn TranscriptSource,
    video_id: &str,
    languages: &[&str],
) -> Option<Vec<TranscriptSegment>> {
    match source.fetch_segments(video_id, languages).await {
        Ok(segments) => Some(segments),
        Err(e) => {
            error!("Failed to fetch transcript segments for video ID {video_id}: {e:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start,
            duration: 2.0,
            text: text.to_string(),
        }
    }

    #[test]
    fn timestamped_lines() {
        let segments = vec![segment(0.0, "hello\nthere"), segment(125.4, "general kenobi")];
        assert_eq!(
            format_transcript(&segments, true),
            "[00:00] hello there\n[02:05] general kenobi"
        );
    }

    #[test]
    fn plain_text() {
        let segments = vec![segment(0.0, "hello\nthere"), segment(3.0, "again")];
        assert_eq!(format_transcript(&segments, false), "hello there again");
    }
}
