use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ae_core::{Article, ArticleFilter, ArticleStore, Error, Result};

/// In-memory store for tests and local runs. Enforces the same url
/// uniqueness rule as the real service.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, articles: Vec<Article>) -> Result<()> {
        for article in &articles {
            self.create(article).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .filter(|article| {
                filter
                    .is_updated
                    .map_or(true, |wanted| article.is_updated == wanted)
            })
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Article> {
        let articles = self.articles.read().await;
        articles
            .iter()
            .find(|article| article.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Error::Storage(format!("article not found: {}", id)))
    }

    async fn create(&self, article: &Article) -> Result<Article> {
        let mut articles = self.articles.write().await;
        if articles.iter().any(|existing| existing.url == article.url) {
            return Err(Error::Conflict(format!(
                "article url already exists: {}",
                article.url
            )));
        }
        let mut stored = article.clone();
        stored.id = Some(Uuid::new_v4().to_string());
        articles.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, article: &Article) -> Result<Article> {
        let id = article
            .id
            .as_deref()
            .ok_or_else(|| Error::Storage("cannot update an article without an id".to_string()))?;
        let mut articles = self.articles.write().await;
        let existing = articles
            .iter_mut()
            .find(|candidate| candidate.id.as_deref() == Some(id))
            .ok_or_else(|| Error::Storage(format!("article not found: {}", id)))?;
        *existing = article.clone();
        Ok(article.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|article| article.id.as_deref() != Some(id));
        if articles.len() == before {
            return Err(Error::Storage(format!("article not found: {}", id)));
        }
        Ok(())
    }
}
