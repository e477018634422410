use crate::utils::{parse_iso8601_duration_to_minutes, watch_url};
use serde::{Deserialize, Serialize};

/// A video as returned by the search + detail lookup round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub channel_name: String,
    pub channel_id: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail: String,
    pub views: u64,
    pub likes: u64,
    pub comment_count: u64,
    pub duration: String, // ISO-8601, e.g. PT12M3S
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedVideo {
    #[serde(flatten)]
    pub candidate: VideoCandidate,
    pub duration_minutes: f64,
    pub url: String,
}

impl ParsedVideo {
    pub fn new(candidate: VideoCandidate) -> Self {
        let duration_minutes = parse_iso8601_duration_to_minutes(&candidate.duration);
        let url = watch_url(&candidate.video_id);
        Self {
            candidate,
            duration_minutes,
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVideo {
    #[serde(flatten)]
    pub video: ParsedVideo,
    pub score: f64, // 0..=100
}

impl ScoredVideo {
    pub fn id(&self) -> &str {
        &self.video.candidate.video_id
    }

    pub fn title(&self) -> &str {
        &self.video.candidate.title
    }

    pub fn channel(&self) -> &str {
        &self.video.candidate.channel_name
    }

    pub fn url(&self) -> &str {
        &self.video.url
    }

    pub fn views(&self) -> u64 {
        self.video.candidate.views
    }

    pub fn likes(&self) -> u64 {
        self.video.candidate.likes
    }

    pub fn comments(&self) -> u64 {
        self.video.candidate.comment_count
    }

    pub fn duration_minutes(&self) -> f64 {
        self.video.duration_minutes
    }

    pub fn keyword(&self) -> &str {
        &self.video.candidate.keyword
    }
}

/// Ranked videos for a single keyword, best first.
pub type RankedResultSet = Vec<ScoredVideo>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hashtags {
    List(Vec<String>),
    Text(String),
}

impl Default for Hashtags {
    fn default() -> Self {
        Hashtags::List(Vec::new())
    }
}

impl Hashtags {
    pub fn joined(&self) -> String {
        match self {
            Hashtags::List(tags) => tags.join(" "),
            Hashtags::Text(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Hashtags::List(tags) => tags.is_empty(),
            Hashtags::Text(text) => text.is_empty(),
        }
    }
}

/// Generated reels script. Which sections are present depends on the concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelsScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip1: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip2: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip3: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScriptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<ScriptSection>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Hashtags,
    #[serde(default)]
    pub cta_keyword: String,
}

impl ReelsScript {
    /// Sections in page order, paired with their key.
    pub fn sections(&self) -> Vec<(&'static str, &ScriptSection)> {
        [
            ("hook", &self.hook),
            ("why", &self.why),
            ("how", &self.how),
            ("tip1", &self.tip1),
            ("tip2", &self.tip2),
            ("tip3", &self.tip3),
            ("lesson", &self.lesson),
            ("application", &self.application),
            ("summary", &self.summary),
            ("cta", &self.cta),
        ]
        .into_iter()
        .filter_map(|(key, section)| section.as_ref().map(|s| (key, s)))
        .collect()
    }
}

/// One row of a CSV backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub channel_id: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail: String,
    pub url: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub duration_iso: String,
    pub duration_minutes: f64,
    pub keyword: String,
    pub score: f64,
    pub notion_page_id: Option<String>,
    pub has_script: Option<bool>,
    pub concept: Option<String>,
}

impl From<&ScoredVideo> for VideoRecord {
    fn from(video: &ScoredVideo) -> Self {
        let candidate = &video.video.candidate;
        Self {
            video_id: candidate.video_id.clone(),
            title: candidate.title.clone(),
            channel: candidate.channel_name.clone(),
            channel_id: candidate.channel_id.clone(),
            description: candidate.description.clone(),
            published_at: candidate.published_at.clone(),
            thumbnail: candidate.thumbnail.clone(),
            url: video.video.url.clone(),
            views: candidate.views,
            likes: candidate.likes,
            comments: candidate.comment_count,
            duration_iso: candidate.duration.clone(),
            duration_minutes: video.video.duration_minutes,
            keyword: candidate.keyword.clone(),
            score: video.score,
            notion_page_id: None,
            has_script: None,
            concept: None,
        }
    }
}
