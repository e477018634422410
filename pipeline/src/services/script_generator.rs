use crate::models::ReelsScript;
use crate::services::generative::{generate_with_retry, GenerativeModel, RetryPolicy};
use crate::utils::{strip_code_fences, truncate_chars};
use clap::ValueEnum;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Transcripts are cut to this many characters before prompting.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    Tutorial,
    Tips,
    Celebrity,
    NumberedTips,
    NumberedLessons,
}

impl Concept {
    /// Talking-head scripts.
    pub const TALKING: [Concept; 3] = [Concept::Tutorial, Concept::Tips, Concept::Celebrity];
    /// Caption-over-music scripts.
    pub const NUMBERED: [Concept; 2] = [Concept::NumberedTips, Concept::NumberedLessons];

    pub fn all() -> Vec<Concept> {
        Self::TALKING.iter().chain(Self::NUMBERED.iter()).copied().collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Concept::Tutorial => "tutorial",
            Concept::Tips => "tips",
            Concept::Celebrity => "celebrity",
            Concept::NumberedTips => "numbered_tips",
            Concept::NumberedLessons => "numbered_lessons",
        }
    }

    pub fn is_talking(&self) -> bool {
        Self::TALKING.contains(self)
    }

    pub fn prompt_file_name(&self) -> String {
        format!("reels_{}.txt", self.as_str())
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiBackend {
    /// Gemini API, used by unattended runs
    Gemini,
    /// Prompt is run by hand in a Claude session
    Claude,
}

impl FromStr for AiBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(AiBackend::Gemini),
            "claude" => Ok(AiBackend::Claude),
            other => Err(anyhow::anyhow!("unknown AI backend: {other}")),
        }
    }
}

pub fn render_prompt(template: &str, video_title: &str, video_url: &str, transcript: &str) -> String {
    template
        .replace("{video_title}", video_title)
        .replace("{video_url}", video_url)
        .replace("{transcript}", &truncate_chars(transcript, TRANSCRIPT_CHAR_LIMIT))
}

pub fn parse_script(text: &str) -> Result<ReelsScript, serde_json::Error> {
    serde_json::from_str(strip_code_fences(text))
}

pub struct ScriptGenerator {
    model: Option<Arc<dyn GenerativeModel>>,
    prompts_dir: PathBuf,
    backend: AiBackend,
    retry: RetryPolicy,
}

impl ScriptGenerator {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            prompts_dir: prompts_dir.into(),
            backend: AiBackend::Gemini,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_backend(mut self, backend: AiBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate a reels script from a timestamped transcript.
    ///
    /// `backend` overrides the configured backend for this call. Returns
    /// `None` when the prompt template is missing, the model call fails after
    /// retries, or the response is not a valid script.
    pub async fn generate_reels_script(
        &self,
        transcript: &str,
        video_title: &str,
        video_url: &str,
        concept: Concept,
        backend: Option<AiBackend>,
    ) -> Option<ReelsScript> {
        let prompt_file = self.prompts_dir.join(concept.prompt_file_name());
        let template = match fs::read_to_string(&prompt_file) {
            Ok(template) => template,
            Err(e) => {
                error!("Prompt file missing: {} ({e})", prompt_file.display());
                return None;
            }
        };
        let prompt = render_prompt(&template, video_title, video_url, transcript);

        match backend.unwrap_or(self.backend) {
            AiBackend::Gemini => self.generate_with_gemini(&prompt).await,
            AiBackend::Claude => {
                info!("Claude backend: run the prompt manually in a Claude session.");
                info!("Prompt file: {}", prompt_file.display());
                None
            }
        }
    }

    async fn generate_with_gemini(&self, prompt: &str) -> Option<ReelsScript> {
        let Some(model) = &self.model else {
            error!("GEMINI_API_KEY is not set; cannot generate script.");
            return None;
        };

        let text = match generate_with_retry(model.as_ref(), prompt, &self.retry).await {
            Ok(text) => text,
            Err(e) => {
                error!("Gemini script generation failed: {e}");
                return None;
            }
        };

        match parse_script(&text) {
            Ok(script) => {
                info!("Reels script generated (Gemini)");
                Some(script)
            }
            Err(e) => {
                error!(
                    "Failed to parse script JSON: {e}\nResponse: {}",
                    truncate_chars(&text, 500)
                );
                None
            }
        }
    }
}
