// SPDX-License-Identifier: MPL-2.0
//! Bounded retry with linear backoff for critical loads.
//!
//! The delay before retry `n` (1-based) is `base_delay × n`; with the
//! defaults, three failed attempts wait 2s then 4s and give up without a
//! trailing sleep. After exhaustion the caller surfaces a manual retry.

use crate::config::RetrySettings;
use crate::domain::ui::MaxFetchAttempts;
use std::future::Future;
use std::time::Duration;

/// How many times to attempt a fetch, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: MaxFetchAttempts,
    pub base_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: MaxFetchAttempts, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// A single attempt, no waiting.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new(MaxFetchAttempts::new(1), Duration::ZERO)
    }

    /// Delay after failed attempt `attempt` (1-based), or `None` if it was the last.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts.value()).then(|| self.base_delay.saturating_mul(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self::new(
            MaxFetchAttempts::new(settings.max_attempts),
            Duration::from_millis(settings.base_delay_ms),
        )
    }
}

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    #[source]
    pub last_error: E,
}

/// Runs `fetch` until it succeeds or the policy is exhausted.
///
/// `fetch` receives the 1-based attempt number.
///
/// # Errors
///
/// Returns [`RetryExhausted`] carrying the last error when every attempt fails.
pub async fn fetch_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    label: &'static str,
    mut fetch: F,
) -> Result<T, RetryExhausted<E>>
where
    E: std::error::Error,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match fetch(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(label, attempt, "fetch succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => match policy.delay_after(attempt) {
                Some(delay) => {
                    tracing::debug!(
                        label,
                        attempt,
                        %error,
                        delay_ms = delay.as_millis() as u64,
                        "fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    tracing::warn!(label, attempts = attempt, %error, "fetch failed, giving up");
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: error,
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::ServiceError;
    use std::cell::Cell;

    #[test]
    fn delay_grows_linearly_and_stops_at_last_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Some(Duration::from_secs(2)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_secs(4)));
        assert_eq!(policy.delay_after(3), None);
    }

    #[test]
    fn no_retry_policy_never_waits() {
        assert_eq!(RetryPolicy::no_retry().delay_after(1), None);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), _> = fetch_with_retry(RetryPolicy::default(), "test", |_| {
            calls.set(calls.get() + 1);
            async { Err(ServiceError::Network("offline".into())) }
        })
        .await;

        let exhausted = result.unwrap_err();
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(calls.get(), 3);
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(6) && waited < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_first_success() {
        let result = fetch_with_retry(RetryPolicy::default(), "test", |attempt| async move {
            if attempt < 2 {
                Err(ServiceError::Status { status: 503 })
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(result, Ok(2));
    }
}
