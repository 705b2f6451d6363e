//! Retry policy for storage calls.
//!
//! Only transient infrastructure failures are retried. An integrity error is returned on the
//! first occurrence, unchanged, because the same request can never succeed.

use std::future::Future;
use std::time::Duration;

use ccrms_core::Result;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Runs `op`, retrying up to `max_retries` times while it fails with a retryable error.
    /// Waits `backoff * attempt` before each retry.
    ///
    /// Delivery is at-least-once: an insert that committed before its connection dropped is sent
    /// again, and the second attempt can come back as a duplicate-key integrity error.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        operation = %operation,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "transient storage failure, retrying"
                    );
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.delay(attempt)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, Duration::from_millis(100))
    }
}
