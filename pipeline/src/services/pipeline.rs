use crate::models::{ReelsScript, ScoredVideo, VideoRecord};
use crate::services::csv_backup::save_to_csv;
use crate::services::discovery::{fetch_video_title, VideoDiscovery};
use crate::services::notion::NotionWriter;
use crate::services::script_generator::{AiBackend, Concept, ScriptGenerator};
use crate::services::transcript::{extract_transcript, TranscriptSource, DEFAULT_LANGUAGES};
use crate::services::youtube::YouTubeApi;
use crate::utils::{extract_youtube_video_id, truncate_chars, watch_url};
use anyhow::Result;
use clap::ValueEnum;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

/// Keywords searched per pipeline run.
pub const PIPELINE_KEYWORD_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConceptMode {
    /// Only the concept passed with --concept
    Single,
    /// Talking-head concepts
    Talking,
    /// Caption-over-music concepts
    Numbered,
    /// Every concept
    All,
}

impl ConceptMode {
    pub fn concepts(&self, single: Concept) -> Vec<Concept> {
        match self {
            ConceptMode::Single => vec![single],
            ConceptMode::Talking => Concept::TALKING.to_vec(),
            ConceptMode::Numbered => Concept::NUMBERED.to_vec(),
            ConceptMode::All => Concept::all(),
        }
    }
}

pub struct Pipeline {
    pub discovery: VideoDiscovery,
    pub transcripts: Arc<dyn TranscriptSource>,
    pub scripts: ScriptGenerator,
    pub notion: Option<NotionWriter>,
    pub csv_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSummary {
    pub discovered: usize,
    pub processed: usize,
    pub talking: usize,
    pub numbered: usize,
}

impl Pipeline {
    /// Search each keyword in turn and concatenate the ranked results.
    pub async fn discover(&self, keywords: &[String], max_results: Option<u32>) -> Vec<ScoredVideo> {
        let mut all_videos = Vec::new();
        for keyword in keywords {
            let videos = self.discovery.search_videos(keyword, max_results, None).await;
            all_videos.extend(videos);
        }
        info!("Discovered {} videos in total", all_videos.len());
        all_videos
    }

    /// Save discovered videos without scripts. Returns how many pages were created.
    pub async fn save_discovered(&self, videos: &[ScoredVideo]) -> usize {
        let Some(notion) = &self.notion else {
            warn!("NOTION_DB_ID is not set, skipping Notion save");
            return 0;
        };
        let mut saved = 0;
        for video in videos {
            if notion.save_video(video, None).await.is_some() {
                saved += 1;
            }
        }
        info!("Saved to Notion: {saved}");
        saved
    }

    async fn save_with_script(&self, video: &ScoredVideo, script: Option<&ReelsScript>) -> Option<String> {
        match &self.notion {
            Some(notion) => notion.save_video(video, script).await,
            None => {
                warn!("NOTION_DB_ID is not set, skipping Notion save");
                None
            }
        }
    }

    /// Transcript → script → Notion for the first `max_videos` videos.
    /// Videos without a transcript are skipped.
    pub async fn process_videos(
        &self,
        videos: &[ScoredVideo],
        concept: Concept,
        max_videos: usize,
    ) -> Vec<VideoRecord> {
        let mut processed = Vec::new();
        for video in videos.iter().take(max_videos) {
            info!("[{concept}] Processing: {}", truncate_chars(video.title(), 60));

            let Some(transcript) =
                extract_transcript(self.transcripts.as_ref(), video.id(), DEFAULT_LANGUAGES, true)
                    .await
            else {
                warn!("No transcript, skipping: {}", video.id());
                continue;
            };

            let script = self
                .scripts
                .generate_reels_script(&transcript, video.title(), video.url(), concept, None)
                .await;

            let page_id = self.save_with_script(video, script.as_ref()).await;

            let mut record = VideoRecord::from(video);
            record.notion_page_id = page_id;
            record.has_script = Some(script.is_some());
            record.concept = Some(concept.to_string());
            processed.push(record);
        }
        processed
    }

    /// Discovery → transcripts → scripts → Notion → CSV backup.
    pub async fn run(
        &self,
        keywords: &[String],
        concepts: &[Concept],
        max_videos: usize,
        dry_run: bool,
    ) -> Result<PipelineSummary> {
        let keywords: Vec<String> = keywords.iter().take(PIPELINE_KEYWORD_LIMIT).cloned().collect();
        let max_results = u32::try_from(max_videos).unwrap_or(u32::MAX);
        let all_videos = self.discover(&keywords, Some(max_results)).await;
        let discovered: Vec<VideoRecord> = all_videos.iter().map(VideoRecord::from).collect();

        if dry_run {
            save_to_csv(&discovered, &self.csv_dir, "dryrun")?;
            info!("Dry run complete");
            return Ok(PipelineSummary {
                discovered: all_videos.len(),
                ..Default::default()
            });
        }

        let mut all_processed = Vec::new();
        for concept in concepts {
            info!("--- Concept: {concept} ---");
            let processed = self.process_videos(&all_videos, *concept, max_videos).await;
            all_processed.extend(processed);
        }

        save_to_csv(&discovered, &self.csv_dir, "discovery")?;
        if !all_processed.is_empty() {
            save_to_csv(&all_processed, &self.csv_dir, "processed")?;
        }

        let is_talking = |record: &&VideoRecord| {
            record
                .concept
                .as_deref()
                .is_some_and(|c| Concept::TALKING.iter().any(|t| t.as_str() == c))
        };
        let talking = all_processed.iter().filter(is_talking).count();
        let summary = PipelineSummary {
            discovered: all_videos.len(),
            processed: all_processed.len(),
            talking,
            numbered: all_processed.len() - talking,
        };
        info!(
            "=== Pipeline complete: {} discovered, {} processed ({} talking + {} numbered) ===",
            summary.discovered, summary.processed, summary.talking, summary.numbered
        );
        Ok(summary)
    }
}

/// Transcript → script for one video given by URL or id. The YouTube API,
/// when available, supplies the real title for the prompt.
pub async fn script_for_video(
    transcripts: &dyn TranscriptSource,
    scripts: &ScriptGenerator,
    youtube: Option<&dyn YouTubeApi>,
    video_url: &str,
    concept: Concept,
    backend: Option<AiBackend>,
) -> Option<ReelsScript> {
    let video_id = extract_youtube_video_id(video_url);
    info!("Processing {video_id} (concept: {concept})");

    let Some(transcript) = extract_transcript(transcripts, &video_id, DEFAULT_LANGUAGES, true).await
    else {
        error!("Transcript extraction failed: {video_id}");
        return None;
    };
    info!("Transcript extracted: {} chars", transcript.chars().count());

    let title = match youtube {
        Some(api) => fetch_video_title(api, &video_id).await,
        None => None,
    }
    .unwrap_or_else(|| video_id.clone());

    scripts
        .generate_reels_script(&transcript, &title, &watch_url(&video_id), concept, backend)
        .await
}
