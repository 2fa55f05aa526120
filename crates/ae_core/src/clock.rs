use std::time::Duration;

use async_trait::async_trait;

/// Sleep abstraction so the pipeline's rate-limit and backoff delays can be
/// skipped in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio timer.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Test clock that records every requested delay without waiting.
#[derive(Debug, Default)]
pub struct NoopClock {
    slept: std::sync::Mutex<Vec<Duration>>,
}

impl NoopClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for NoopClock {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
