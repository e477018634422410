use anyhow::{Context, Result};
use chrono::{Datelike, Weekday};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Search keywords grouped by category, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordStore {
    categories: BTreeMap<String, Vec<String>>,
}

impl KeywordStore {
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Self {
        Self { categories }
    }

    /// Keywords shipped with the binary, used until the first refresh.
    pub fn builtin() -> Self {
        let groups: [(&str, &[&str]); 5] = [
            (
                "ai_tools",
                &[
                    "Best AI tools solopreneurs",
                    "Top AI content creation",
                    "AI writing assistants compared",
                    "Generative AI art tutorial",
                    "AI video editing tools",
                ],
            ),
            (
                "automation",
                &[
                    "Zapier workflow automation tips",
                    "Make.com automation tutorial",
                    "Automate small business tasks",
                    "Freelance workflow automation setup",
                    "AI email marketing automation",
                ],
            ),
            (
                "business_strategy",
                &[
                    "AI strategy for small business",
                    "Shopify CRO optimization AI",
                    "HubSpot CRM automation guide",
                    "AI business model innovation",
                ],
            ),
            (
                "productivity",
                &[
                    "AI productivity hacks for work",
                    "Time blocking for focus",
                    "Digital workflow optimization AI",
                    "AI for meeting summaries",
                ],
            ),
            (
                "solopreneur",
                &[
                    "Solopreneur business growth strategies",
                    "Freelance business scaling tips",
                    "Build a solo online business",
                    "Side project management AI",
                    "Small team lead productivity",
                ],
            ),
        ];

        let categories = groups
            .iter()
            .map(|(category, keywords)| {
                (
                    category.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }

    /// Load from `path`, falling back to the built-in set when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::builtin());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading keywords from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing keywords in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Saved {} keywords in {} categories to {}",
            self.total(),
            self.categories.len(),
            path.display()
        );
        Ok(())
    }

    pub fn all_keywords(&self) -> Vec<String> {
        self.categories.values().flatten().cloned().collect()
    }

    pub fn keywords_by_category(&self, category: &str) -> Vec<String> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// Category of the day; Monday picks the first category.
    pub fn category_for_day(&self, weekday: Weekday) -> Option<String> {
        let categories = self.categories();
        if categories.is_empty() {
            return None;
        }
        let idx = weekday.num_days_from_monday() as usize % categories.len();
        categories.into_iter().nth(idx)
    }

    pub fn category_for_today(&self) -> Option<String> {
        self.category_for_day(chrono::Local::now().weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_around_categories() {
        let store = KeywordStore::builtin();
        assert_eq!(store.category_for_day(Weekday::Mon).as_deref(), Some("ai_tools"));
        assert_eq!(store.category_for_day(Weekday::Fri).as_deref(), Some("solopreneur"));
        assert_eq!(store.category_for_day(Weekday::Sat).as_deref(), Some("ai_tools"));
        assert_eq!(KeywordStore::default().category_for_day(Weekday::Mon), None);
    }

    #[test]
    fn builtin_lookup() {
        let store = KeywordStore::builtin();
        assert_eq!(store.total(), 23);
        assert_eq!(store.keywords_by_category("productivity").len(), 4);
        assert!(store.keywords_by_category("nope").is_empty());
        assert_eq!(store.all_keywords().len(), store.total());
    }
}
