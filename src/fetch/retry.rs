use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::FetchError;

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included. Zero behaves like one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Sleep after failed attempt `attempt` (0-based): `base * 2^attempt`.
    #[must_use]
    pub fn delay_after(self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Last error of a request that failed on every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted {
    pub error: FetchError,
    pub attempts: u32,
}

/// Runs `operation` until it succeeds or the policy's attempts run out.
///
/// `operation` receives the 0-based attempt number. Every error is retried.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if attempt + 1 >= max_attempts => {
                return Err(RetryExhausted {
                    error,
                    attempts: attempt + 1,
                });
            }
            Err(error) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "request failed; retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
