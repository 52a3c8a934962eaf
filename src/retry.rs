//! Retry policy with exponential backoff.
//!
//! Executes an operation up to a fixed number of attempts, sleeping
//! `base_delay * 2^(attempt-1)` between attempts. No jitter and no cap;
//! the delay only suspends the task running the operation. The final
//! attempt's failure is returned immediately, without a trailing sleep.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded-retry executor for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` must be >= 1; a value of 1 means
    /// a single attempt with immediate propagation on failure.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        debug_assert!(max_attempts >= 1);
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before attempt `attempt + 1`, given a failed `attempt` (1-based).
    /// Saturates instead of overflowing for very high attempt counts.
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt - 1))
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// Attempts are numbered 1..=max. Each failure is logged with its
    /// attempt number; the last failure is propagated to the caller.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(attempt, max_attempts = self.max_attempts, error = %e, "Retry attempt failed");
                    if attempt >= self.max_attempts {
                        return Err(e);
                    }
                    tokio::time::sleep(self.backoff(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}
