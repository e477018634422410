use crate::services::generative::GeminiModel;
use crate::services::notion::NotionClient;
use crate::services::youtube::YouTubeClient;
use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String = env::var("YOUTUBE_API_KEY").unwrap_or_default();
    pub static ref GEMINI_API_KEY: String = env::var("GEMINI_API_KEY").unwrap_or_default();
    pub static ref NOTION_TOKEN: String = env::var("NOTION_TOKEN").unwrap_or_default();
    pub static ref NOTION_DB_ID: String = env::var("NOTION_DB_ID").unwrap_or_default();
    // "gemini" for unattended cron runs, "claude" for manual runs
    pub static ref AI_BACKEND: String =
        env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());
    pub static ref PROJECT_ROOT: PathBuf = env::var("REEL_SCOUT_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
}

/// Search filters applied during discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryFilters {
    pub min_views: u64,
    pub min_duration_minutes: f64,
    pub max_duration_minutes: f64,
    pub max_age_days: i64,
    pub max_results_per_keyword: u32,
    pub language: String,
}

impl Default for DiscoveryFilters {
    fn default() -> Self {
        Self {
            min_views: 5_000,
            min_duration_minutes: 4.0,
            max_duration_minutes: 40.0,
            max_age_days: 180,
            max_results_per_keyword: 10,
            language: "en".to_string(),
        }
    }
}

/// Weights of the composite relevance score. Expected to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            views: 0.4,
            likes: 0.3,
            comments: 0.2,
            recency: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordValidation {
    pub min_results: u64,
    pub min_avg_views: f64,
    pub top_n_for_avg: u32,
}

impl Default for KeywordValidation {
    fn default() -> Self {
        Self {
            min_results: 5,
            min_avg_views: 3_000.0,
            top_n_for_avg: 5,
        }
    }
}

pub fn output_dir() -> PathBuf {
    PROJECT_ROOT.join("output")
}

pub fn csv_dir() -> PathBuf {
    output_dir().join("csv")
}

pub fn log_dir() -> PathBuf {
    output_dir().join("logs")
}

pub fn prompts_dir() -> PathBuf {
    PROJECT_ROOT.join("prompts")
}

pub fn keywords_file() -> PathBuf {
    PROJECT_ROOT.join("config").join("keywords.json")
}

pub fn persona_doc() -> PathBuf {
    PROJECT_ROOT.join("docs").join("persona.md")
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Logs to stderr, and additionally to `log_file` when given.
pub fn init_logger(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(TeeWriter { file })));
    }

    builder.try_init()?;
    Ok(())
}

pub fn create_youtube_client() -> Result<YouTubeClient> {
    let api_key = &*YOUTUBE_API_KEY;
    if api_key.is_empty() {
        anyhow::bail!("YOUTUBE_API_KEY is not set. Check your .env file.");
    }
    info!("YouTube Data API client ready.");
    Ok(YouTubeClient::new(api_key.clone()))
}

pub fn create_gemini_model() -> Result<GeminiModel> {
    let api_key = &*GEMINI_API_KEY;
    if api_key.is_empty() {
        anyhow::bail!("GEMINI_API_KEY is not set.");
    }
    Ok(GeminiModel::new(api_key.clone()))
}

/// Returns `None` when no database is configured; saving is then skipped.
pub fn create_notion_client() -> Result<Option<NotionClient>> {
    if NOTION_DB_ID.is_empty() {
        return Ok(None);
    }
    if NOTION_TOKEN.is_empty() {
        anyhow::bail!("NOTION_TOKEN is not set.");
    }
    Ok(Some(NotionClient::new(
        NOTION_TOKEN.clone(),
        NOTION_DB_ID.clone(),
    )))
}
