use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use ae_core::{Clock, CompetitorResult, Error, Result};

use crate::keywords::{extract_keywords, relaxed_query};

/// One raw hit from the search backend.
#[derive(Debug, Clone)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Search failures, split by how the finder reacts to them: throttling is
/// retried, everything else is not.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("search throttled (status {0})")]
    Throttled(u16),

    #[error("search rejected (status {0})")]
    Rejected(u16),

    #[error("search transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    fn is_throttled(&self) -> bool {
        matches!(self, SearchError::Throttled(_))
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        query: &str,
        count: u32,
    ) -> std::result::Result<Vec<SearchItem>, SearchError>;
}

/// Google Custom Search JSON API client.
pub struct GoogleSearch {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

impl GoogleSearch {
    pub fn new(api_key: String, engine_id: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(SEARCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            engine_id,
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
        })
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<ResponseItem>,
}

#[derive(Deserialize)]
struct ResponseItem {
    #[serde(default)]
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchBackend for GoogleSearch {
    async fn search(
        &self,
        query: &str,
        count: u32,
    ) -> std::result::Result<Vec<SearchItem>, SearchError> {
        let count = count.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", count.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(SearchError::Throttled(status.as_u16()));
        }
        if !status.is_success() {
            return Err(SearchError::Rejected(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body
            .items
            .into_iter()
            .map(|item| SearchItem {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect())
    }
}

/// Domains we never use as competitors: the publisher's own site, social and
/// video platforms, and direct PDF links.
const EXCLUDED_DOMAINS: &[&str] = &[
    "beyondchats.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    ".pdf",
];

const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(2);
const FALLBACK_DELAY: Duration = Duration::from_secs(2);
const SEARCH_RESULT_COUNT: u32 = 10;
const MAX_COMPETITORS: usize = 2;

/// Finds up to two competitor articles for a title via the search backend,
/// retrying on throttling and relaxing the query before giving up.
pub struct CompetitorFinder {
    backend: Arc<dyn SearchBackend>,
    clock: Arc<dyn Clock>,
}

impl CompetitorFinder {
    pub fn new(backend: Arc<dyn SearchBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Returns 0-2 competitor results for the title.
    ///
    /// Non-throttling search failures yield an empty result set; a throttled
    /// backend that stays throttled through the relaxed query surfaces
    /// [`Error::SearchUnavailable`]. The caller treats both as "use the
    /// static fallback".
    pub async fn find(&self, title: &str) -> Result<Vec<CompetitorResult>> {
        let query = extract_keywords(title);
        if query.is_empty() {
            warn!("No usable keywords in title: {}", title);
            return Ok(Vec::new());
        }
        info!("🔍 Searching competitors for: {}", query);

        let mut attempt = 0u32;
        let items = loop {
            match self.backend.search(&query, SEARCH_RESULT_COUNT).await {
                Ok(items) => break items,
                Err(err) if err.is_throttled() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    let delay = BACKOFF_BASE * 2u32.pow(attempt - 1);
                    warn!(
                        "Search throttled ({}), retrying {}/{} after {:?}",
                        err, attempt, MAX_RETRIES, delay
                    );
                    self.clock.sleep(delay).await;
                }
                Err(err) if err.is_throttled() => {
                    let fallback = relaxed_query(title);
                    warn!("Search still throttled, trying relaxed query: {}", fallback);
                    self.clock.sleep(FALLBACK_DELAY).await;
                    match self.backend.search(&fallback, SEARCH_RESULT_COUNT).await {
                        Ok(items) => break items,
                        Err(err) => {
                            return Err(Error::SearchUnavailable(err.to_string()));
                        }
                    }
                }
                Err(err) => {
                    warn!("Search failed without throttling, not retrying: {}", err);
                    return Ok(Vec::new());
                }
            }
        };

        if items.is_empty() {
            warn!("No search results for: {}", query);
            return Ok(Vec::new());
        }
        info!("Search returned {} results", items.len());

        let results: Vec<CompetitorResult> = items
            .into_iter()
            .filter(|item| {
                let url = item.link.to_lowercase();
                let excluded = EXCLUDED_DOMAINS.iter().any(|domain| url.contains(domain));
                if excluded {
                    info!("Excluded: {}", item.link);
                }
                !excluded
            })
            .take(MAX_COMPETITORS)
            .map(|item| CompetitorResult {
                title: item.title,
                url: item.link,
                snippet: item.snippet,
            })
            .collect();

        info!("Found {} competitor articles", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_core::NoopClock;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct QueuedBackend {
        responses: Mutex<VecDeque<std::result::Result<Vec<SearchItem>, SearchError>>>,
        queries: Mutex<Vec<String>>,
    }

    impl QueuedBackend {
        fn new(
            responses: Vec<std::result::Result<Vec<SearchItem>, SearchError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for QueuedBackend {
        async fn search(
            &self,
            query: &str,
            _count: u32,
        ) -> std::result::Result<Vec<SearchItem>, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SearchError::Throttled(429)))
        }
    }

    fn item(url: &str) -> SearchItem {
        SearchItem {
            title: format!("Article at {}", url),
            link: url.to_string(),
            snippet: "snippet".to_string(),
        }
    }

    fn finder(backend: Arc<QueuedBackend>, clock: Arc<NoopClock>) -> CompetitorFinder {
        CompetitorFinder::new(backend, clock)
    }

    #[tokio::test]
    async fn test_filters_excluded_domains() {
        let backend = Arc::new(QueuedBackend::new(vec![Ok(vec![
            item("https://www.youtube.com/watch?v=1"),
            item("https://beyondchats.com/blog/post"),
            item("https://example.com/report.pdf"),
            item("https://blog.example.com/chatbots"),
            item("https://other.example.com/guide"),
        ])]));
        let results = finder(backend, Arc::new(NoopClock::new()))
            .find("Chatbot Guide for Teams")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://blog.example.com/chatbots");
        assert_eq!(results[1].url, "https://other.example.com/guide");
    }

    #[tokio::test]
    async fn test_returns_at_most_two_results() {
        let backend = Arc::new(QueuedBackend::new(vec![Ok(vec![
            item("https://a.example.com/1"),
            item("https://b.example.com/2"),
            item("https://c.example.com/3"),
        ])]));
        let results = finder(backend, Arc::new(NoopClock::new()))
            .find("Chatbot Guide")
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_retries_on_throttle_with_backoff() {
        let backend = Arc::new(QueuedBackend::new(vec![
            Err(SearchError::Throttled(429)),
            Err(SearchError::Throttled(429)),
            Ok(vec![item("https://example.com/post")]),
        ]));
        let clock = Arc::new(NoopClock::new());
        let results = finder(backend.clone(), clock.clone())
            .find("Chatbot Guide")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            clock.slept(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
        assert_eq!(backend.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_throttling_uses_relaxed_query() {
        let mut responses: Vec<std::result::Result<Vec<SearchItem>, SearchError>> =
            (0..4).map(|_| Err(SearchError::Throttled(429))).collect();
        responses.push(Ok(vec![item("https://example.com/fallback")]));
        let backend = Arc::new(QueuedBackend::new(responses));
        let clock = Arc::new(NoopClock::new());

        let results = finder(backend.clone(), clock.clone())
            .find("Healthcare Chatbots Improve Outcomes")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let queries = backend.queries();
        assert_eq!(queries.len(), 5);
        assert_eq!(queries[4], "healthcare chatbots guide tutorial");
        // 2s, 4s, 8s backoff plus the fixed pre-delay before the relaxed try.
        assert_eq!(
            clock.slept(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(2),
            ]
        );
    }

    #[tokio::test]
    async fn test_throttled_through_fallback_is_unavailable() {
        let backend = Arc::new(QueuedBackend::new(
            (0..5).map(|_| Err(SearchError::Throttled(429))).collect(),
        ));
        let err = finder(backend, Arc::new(NoopClock::new()))
            .find("Chatbot Guide")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SearchUnavailable(_)));
    }

    #[tokio::test]
    async fn test_rejected_request_is_not_retried() {
        let backend = Arc::new(QueuedBackend::new(vec![Err(SearchError::Rejected(400))]));
        let clock = Arc::new(NoopClock::new());
        let results = finder(backend.clone(), clock.clone())
            .find("Chatbot Guide")
            .await
            .unwrap();

        assert!(results.is_empty());
        assert!(clock.slept().is_empty());
        assert_eq!(backend.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_title_searches_nothing() {
        let backend = Arc::new(QueuedBackend::new(vec![]));
        let results = finder(backend.clone(), Arc::new(NoopClock::new()))
            .find("of the!")
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(backend.queries().is_empty());
    }
}
