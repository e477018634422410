use clap::{Parser, Subcommand};
use reel_scout::services::pipeline::ConceptMode;
use reel_scout::services::script_generator::{AiBackend, Concept};

#[derive(Parser)]
#[command(name = "reel-scout")]
#[command(about = "Discover YouTube videos and turn them into reels scripts")]
#[command(version)]
#[command(after_help = "\x1b[1;36mExamples:\x1b[0m
  reel-scout discover -k \"zapier automation\"   Search a single keyword
  reel-scout discover -c productivity          Search one keyword category
  reel-scout script https://youtu.be/<id>      Script a single video
  reel-scout pipeline --mode all               Full run (cron)
  reel-scout refresh-keywords                  Regenerate the keyword list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover, score and store videos for the configured keywords
    Discover {
        /// Search a single keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Search every keyword of one category
        #[arg(short, long, conflicts_with = "keyword")]
        category: Option<String>,

        /// Maximum search results per keyword
        #[arg(short = 'n', long, default_value_t = 10)]
        max_results: u32,

        /// Skip saving to Notion
        #[arg(long)]
        no_notion: bool,

        /// Skip the CSV backup
        #[arg(long)]
        no_csv: bool,
    },

    /// Extract the transcript of one video and generate a reels script
    Script {
        /// YouTube URL or video id
        video_url: String,

        #[arg(short, long, value_enum, default_value_t = Concept::Tutorial)]
        concept: Concept,

        /// Override AI_BACKEND for this run
        #[arg(short, long, value_enum)]
        backend: Option<AiBackend>,
    },

    /// Discovery, transcripts, scripts, Notion and CSV in one run
    Pipeline {
        /// Use this category instead of the category of the day
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum videos processed per concept
        #[arg(short = 'n', long, default_value_t = 5)]
        max_videos: usize,

        /// Concept used with --mode single
        #[arg(long, value_enum, default_value_t = Concept::Tutorial)]
        concept: Concept,

        #[arg(long, value_enum, default_value_t = ConceptMode::Single)]
        mode: ConceptMode,

        /// Only discover and write a CSV; no scripts, no Notion
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate keyword candidates from the persona document and validate them
    RefreshKeywords {
        /// Number of keyword candidates to generate
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,

        /// Skip YouTube validation (saves API quota)
        #[arg(long)]
        skip_validation: bool,
    },
}
