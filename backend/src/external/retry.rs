//! Bounded retry for provider calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::UpstreamForecastError;

/// Attempts, spacing and pacing of a retried provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait after a retryable failure before the next attempt
    pub backoff: Duration,
    /// Wait before every attempt; keeps the caller under the provider's rate limit
    pub pacing_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
            pacing_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// No waiting at all; for tests that count attempts only
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
            pacing_delay: Duration::ZERO,
        }
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// policy's attempts are used up.
pub async fn call_with_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T, UpstreamForecastError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamForecastError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        if !policy.pacing_delay.is_zero() {
            tokio::time::sleep(policy.pacing_delay).await;
        }

        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => err,
            Err(err) => return Err(err),
        };

        if attempts >= max_attempts {
            return Err(UpstreamForecastError::RetriesExhausted {
                operation,
                attempts,
                last: Box::new(err),
            });
        }

        warn!(
            "{} attempt {} failed: {}. Retrying in {:?} ({} attempts left)",
            operation,
            attempts,
            err,
            policy.backoff,
            max_attempts - attempts
        );
        tokio::time::sleep(policy.backoff).await;
    }
}
