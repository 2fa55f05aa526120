use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use ae_core::{Article, ArticleFilter, ArticleStore, Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const LIST_LIMIT: u32 = 100;

/// Responses come wrapped in a `{success, count, data}` envelope.
#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    count: usize,
    data: Vec<Article>,
}

#[derive(Deserialize)]
struct ItemEnvelope {
    data: Article,
}

/// Client for the article CRUD service.
pub struct ApiStore {
    client: reqwest::Client,
    base_url: String,
}

impl ApiStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn parse_item(&self, response: reqwest::Response) -> Result<Article> {
        let status = response.status();
        if status.as_u16() == 409 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Conflict(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "article API returned status {}: {}",
                status, body
            )));
        }
        let envelope: ItemEnvelope = response
            .json()
            .await
            .map_err(|err| Error::Storage(format!("malformed API response: {}", err)))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ArticleStore for ApiStore {
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>> {
        let mut request = self
            .client
            .get(format!("{}/articles", self.base_url))
            .query(&[("limit", LIST_LIMIT.to_string())]);
        if let Some(is_updated) = filter.is_updated {
            request = request.query(&[("isUpdated", is_updated.to_string())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Storage(format!(
                "article API returned status {}",
                status
            )));
        }
        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|err| Error::Storage(format!("malformed API response: {}", err)))?;
        info!("Fetched {} articles from API", envelope.count);
        Ok(envelope.data)
    }

    async fn get(&self, id: &str) -> Result<Article> {
        let response = self
            .client
            .get(format!("{}/articles/{}", self.base_url, id))
            .send()
            .await?;
        self.parse_item(response).await
    }

    async fn create(&self, article: &Article) -> Result<Article> {
        info!("📤 Publishing article: {}", article.title);
        let response = self
            .client
            .post(format!("{}/articles", self.base_url))
            .json(article)
            .send()
            .await?;
        self.parse_item(response).await
    }

    async fn update(&self, article: &Article) -> Result<Article> {
        let id = article
            .id
            .as_deref()
            .ok_or_else(|| Error::Storage("cannot update an article without an id".to_string()))?;
        let response = self
            .client
            .put(format!("{}/articles/{}", self.base_url, id))
            .json(article)
            .send()
            .await?;
        self.parse_item(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/articles/{}", self.base_url, id))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Storage(format!(
                "article API returned status {}",
                status
            )));
        }
        Ok(())
    }
}
