use crate::services::generative::GenerativeModel;
use crate::services::keywords::KeywordStore;
use crate::utils::{strip_code_fences, truncate_chars};
use log::{error, info};

const KEYWORD_GEN_PROMPT: &str = r#"You are a YouTube keyword strategist.

Based on the following business persona document, generate YouTube search keywords
that would help find tutorial/educational content relevant to this audience.

## Persona Document:
{persona}

## Requirements:
- Generate exactly {count} keywords grouped into categories
- Target audience: AI-powered solopreneurs, freelancers, small team leaders
- Focus on: AI tools, automation, productivity, solo business
- Keywords should be in English (YouTube global audience)
- Each keyword should be 2-5 words, searchable on YouTube
- Mix of: tool tutorials, how-to guides, comparison videos, tips

## Output Format (JSON):
{
  "ai_tools": ["keyword1", "keyword2", ...],
  "automation": ["keyword1", "keyword2", ...],
  "solopreneur": ["keyword1", "keyword2", ...],
  "productivity": ["keyword1", "keyword2", ...],
  "business_strategy": ["keyword1", "keyword2", ...]
}

Return ONLY valid JSON, no markdown fences.
"#;

pub fn keyword_prompt(persona: &str, count: usize) -> String {
    KEYWORD_GEN_PROMPT
        .replace("{persona}", persona)
        .replace("{count}", &count.to_string())
}

/// Ask the model for roughly `count` categorised keyword candidates.
/// Any failure yields an empty store.
pub async fn generate_keywords(model: &dyn GenerativeModel, persona: &str, count: usize) -> KeywordStore {
    let text = match model.generate(&keyword_prompt(persona, count)).await {
        Ok(text) => text,
        Err(e) => {
            error!("Keyword generation failed: {e}");
            return KeywordStore::default();
        }
    };

    match serde_json::from_str::<KeywordStore>(strip_code_fences(&text)) {
        Ok(keywords) => {
            info!(
                "Generated {} keywords in {} categories",
                keywords.total(),
                keywords.categories().len()
            );
            keywords
        }
        Err(e) => {
            error!(
                "Failed to parse keyword JSON: {e}\nResponse: {}",
                truncate_chars(&text, 500)
            );
            KeywordStore::default()
        }
    }
}
