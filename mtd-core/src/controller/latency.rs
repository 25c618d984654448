use std::time::Duration;

use async_trait::async_trait;

/// The pause between accepting a submission and recording it, standing in
/// for the round trip to HMRC.
#[async_trait]
pub trait SubmissionLatency: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed duration on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmissionLatency for SimulatedLatency {
    async fn wait(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl SubmissionLatency for NoLatency {
    async fn wait(&self) {}
}
