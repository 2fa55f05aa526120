use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

/// Listing filter. `is_updated: Some(false)` selects the originals the
/// pipeline still has to process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    pub is_updated: Option<bool>,
}

impl ArticleFilter {
    pub fn originals() -> Self {
        Self {
            is_updated: Some(false),
        }
    }

    pub fn enhanced() -> Self {
        Self {
            is_updated: Some(true),
        }
    }
}

/// The article store the pipeline reads originals from and publishes
/// enhanced articles to.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>>;

    async fn get(&self, id: &str) -> Result<Article>;

    /// Persist a new article. Assigns the id. Fails with [`crate::Error::Conflict`]
    /// when the url collides with an existing record.
    async fn create(&self, article: &Article) -> Result<Article>;

    async fn update(&self, article: &Article) -> Result<Article>;

    async fn delete(&self, id: &str) -> Result<()>;
}
