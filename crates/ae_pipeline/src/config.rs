use std::time::Duration;

/// Tunables for a pipeline run. Defaults mirror the production settings:
/// one article at a time, three retries, five seconds between articles.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Articles per batch; batches are still processed sequentially.
    pub batch_size: usize,
    /// Retry budget for each article. The budget is per article, not shared
    /// across the run, so early failures cannot starve later articles.
    pub retry_attempts: u32,
    /// Pause after every article, success or failure.
    pub rate_limit_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            retry_attempts: 3,
            rate_limit_delay: Duration::from_secs(5),
        }
    }
}
