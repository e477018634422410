mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use log::{error, info, warn};
use reel_scout::config::{self, KeywordValidation, AI_BACKEND};
use reel_scout::models::VideoRecord;
use reel_scout::services::csv_backup::save_to_csv;
use reel_scout::services::generative::GenerativeModel;
use reel_scout::services::keyword_generator::generate_keywords;
use reel_scout::services::keyword_validator::validate_keywords;
use reel_scout::services::keywords::KeywordStore;
use reel_scout::services::notion::NotionWriter;
use reel_scout::services::pipeline::{script_for_video, Pipeline};
use reel_scout::services::script_generator::{AiBackend, ScriptGenerator};
use reel_scout::services::transcript::YtTranscriptSource;
use reel_scout::services::youtube::YouTubeApi;
use reel_scout::VideoDiscovery;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

fn configured_backend() -> AiBackend {
    AI_BACKEND.parse().unwrap_or_else(|e| {
        warn!("{e}; falling back to gemini");
        AiBackend::Gemini
    })
}

fn script_generator() -> ScriptGenerator {
    let model = match config::create_gemini_model() {
        Ok(model) => Some(Arc::new(model) as Arc<dyn GenerativeModel>),
        Err(e) => {
            warn!("{e}");
            None
        }
    };
    ScriptGenerator::new(model, config::prompts_dir()).with_backend(configured_backend())
}

fn build_pipeline(youtube: Arc<dyn YouTubeApi>) -> Result<Pipeline> {
    let notion = config::create_notion_client()?.map(|client| NotionWriter::new(Arc::new(client)));
    Ok(Pipeline {
        discovery: VideoDiscovery::new(youtube),
        transcripts: Arc::new(YtTranscriptSource),
        scripts: script_generator(),
        notion,
        csv_dir: config::csv_dir(),
    })
}

/// Keywords for a run: an explicit keyword, one category, or `fallback`.
fn select_keywords(
    store: &KeywordStore,
    keyword: Option<String>,
    category: Option<&str>,
) -> Result<Vec<String>> {
    if let Some(keyword) = keyword {
        return Ok(vec![keyword]);
    }
    if let Some(category) = category {
        let keywords = store.keywords_by_category(category);
        if keywords.is_empty() {
            anyhow::bail!(
                "Unknown category '{category}'. Available: {:?}",
                store.categories()
            );
        }
        return Ok(keywords);
    }
    let keywords = store.all_keywords();
    if keywords.is_empty() {
        anyhow::bail!("No keywords configured. Run `reel-scout refresh-keywords` first.");
    }
    Ok(keywords)
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Discover {
            keyword,
            category,
            max_results,
            no_notion,
            no_csv,
        } => {
            let store = KeywordStore::load(&config::keywords_file())?;
            let keywords = select_keywords(&store, keyword, category.as_deref())?;
            let preview: Vec<&String> = keywords.iter().take(5).collect();
            info!(
                "Searching {} keywords: {preview:?}{}",
                keywords.len(),
                if keywords.len() > 5 { "..." } else { "" }
            );

            let pipeline = build_pipeline(Arc::new(config::create_youtube_client()?))?;
            let videos = pipeline.discover(&keywords, Some(max_results)).await;

            if !no_notion && !videos.is_empty() {
                pipeline.save_discovered(&videos).await;
            }
            if !no_csv && !videos.is_empty() {
                let records: Vec<VideoRecord> = videos.iter().map(VideoRecord::from).collect();
                save_to_csv(&records, &config::csv_dir(), "discovery")?;
            }
        }

        Commands::Script {
            video_url,
            concept,
            backend,
        } => {
            let youtube = config::create_youtube_client().ok();
            let script = script_for_video(
                &YtTranscriptSource,
                &script_generator(),
                youtube.as_ref().map(|client| client as &dyn YouTubeApi),
                &video_url,
                concept,
                backend,
            )
            .await;

            if let Some(script) = script {
                println!("{}", serde_json::to_string_pretty(&script)?);
            }
        }

        Commands::Pipeline {
            category,
            max_videos,
            concept,
            mode,
            dry_run,
        } => {
            info!("=== Pipeline start ===");
            let concepts = mode.concepts(concept);

            let store = KeywordStore::load(&config::keywords_file())?;
            let keywords = match category {
                Some(category) => store.keywords_by_category(&category),
                None => match store.category_for_today() {
                    Some(category) => {
                        info!("Category of the day: {category}");
                        store.keywords_by_category(&category)
                    }
                    None => store.all_keywords(),
                },
            };
            if keywords.is_empty() {
                anyhow::bail!("No keywords. Run `reel-scout refresh-keywords` first.");
            }

            let pipeline = build_pipeline(Arc::new(config::create_youtube_client()?))?;
            pipeline.run(&keywords, &concepts, max_videos, dry_run).await?;
        }

        Commands::RefreshKeywords {
            count,
            skip_validation,
        } => {
            let model = config::create_gemini_model()?;
            let persona_path = config::persona_doc();
            let persona = fs::read_to_string(&persona_path)
                .with_context(|| format!("reading persona document {}", persona_path.display()))?;

            info!("Generating {count} keyword candidates...");
            let candidates = generate_keywords(&model, &persona, count).await;
            if candidates.is_empty() {
                anyhow::bail!("Keyword generation failed");
            }
            info!("Generated {} candidates", candidates.total());

            let validated = if skip_validation {
                info!("Skipping YouTube validation (--skip-validation)");
                candidates
            } else {
                info!("Validating keywords on YouTube...");
                let youtube = config::create_youtube_client()?;
                validate_keywords(&youtube, &candidates, &KeywordValidation::default()).await
            };
            if validated.is_empty() {
                anyhow::bail!("No keyword passed validation");
            }

            validated.save(&config::keywords_file())?;
            info!("Done: {} keywords saved", validated.total());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    config::load_environment();
    let cli = Cli::parse();

    let log_file = matches!(cli.command, Commands::Pipeline { .. }).then(|| {
        config::log_dir().join(format!(
            "pipeline_{}.log",
            chrono::Local::now().format("%Y%m%d")
        ))
    });
    if let Err(e) = config::init_logger(log_file.as_deref()) {
        eprintln!("Failed to initialise logging: {e:#}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
