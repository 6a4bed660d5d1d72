use crate::driver::cli::DEFAULT_PREFIX;
use crate::driver::http::DEFAULT_TIMEOUT;
use std::time::Duration;

/// Settings for building a [`TestRunner`](super::TestRunner) against the
/// production engine drivers.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Command that starts the engine CLI, e.g. `n8n` or `docker exec <cid> n8n`.
    pub engine_prefix: String,
    /// Per-request timeout for webhook calls.
    pub webhook_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            engine_prefix: DEFAULT_PREFIX.to_string(),
            webhook_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RunnerConfig {
    pub fn with_engine_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.engine_prefix = prefix.into();
        self
    }

    pub fn with_webhook_timeout(mut self, timeout: Duration) -> Self {
        self.webhook_timeout = timeout;
        self
    }
}
