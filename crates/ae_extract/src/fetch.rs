use std::time::Duration;

use async_trait::async_trait;

use ae_core::{Error, Result};

/// Fetches a page's raw HTML. Kept behind a trait so extraction can be
/// exercised without the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// reqwest-backed fetcher with a browser-like user agent. Some hosts refuse
/// requests without one.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Extraction(format!(
                "fetch of {} returned status {}",
                url, status
            )));
        }
        Ok(response.text().await?)
    }
}
