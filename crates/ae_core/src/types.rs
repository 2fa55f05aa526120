use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog article, either scraped from the publisher's site or produced by
/// the rewrite pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Assigned by the store on creation; `None` until then. The remote
    /// API calls this `_id`.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// HTML body; source of truth for display and word counts.
    pub content: String,
    #[serde(default)]
    pub is_updated: bool,
    /// Set only on enhanced articles, pointing at the original they were
    /// derived from. Never forms a cycle.
    #[serde(default)]
    pub original_article_id: Option<String>,
    /// Competitor URLs consulted while rewriting; empty for originals.
    #[serde(default)]
    pub references: Vec<String>,
}

impl Article {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A search hit for a competitor article. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// A competitor article after its page was fetched and reduced to readable
/// plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub length: usize,
}
