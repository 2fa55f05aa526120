use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("content extraction failed: {0}")]
    Extraction(String),

    #[error("text generation failed: {0}")]
    Generation(String),

    #[error("duplicate record: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Duplicate-url conflicts always recur for the same input, so the
    /// orchestrator must not burn retries on them.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Conflict(_))
    }
}
