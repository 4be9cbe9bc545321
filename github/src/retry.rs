//! Bounded retries with jittered exponential backoff.
//!
//! [`with_retry`] drives an arbitrary async operation: transient failures
//! (as judged by [`ApiError::is_transient`]) are retried up to
//! `max_retries` times, waiting between attempts for either the
//! server-suggested delay or a jittered exponential backoff. Terminal
//! failures and exhausted budgets hand the original error back unchanged so
//! callers can keep pattern-matching on it.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::error::ApiError;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1_000);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Observer invoked before each retry sleep with the failed attempt's error,
/// the one-based attempt number, and the chosen delay.
pub type OnRetry = Arc<dyn Fn(&ApiError, u32, Duration) + Send + Sync>;

/// Retry budget and delay shape for [`with_retry`].
#[derive(Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; `3` means up to four calls total.
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each subsequent one.
    pub base_delay: Duration,
    /// Ceiling for any single delay, server-suggested ones included.
    pub max_delay: Duration,
    /// Optional per-retry observer, e.g. for progress output.
    pub on_retry: Option<OnRetry>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            on_retry: None,
        }
    }
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}

/// Exponential backoff for the given zero-based attempt, jittered to
/// desynchronize concurrent retriers.
///
/// The raw delay is `min(max, base * 2^attempt)` with the exponent capped at
/// 31 to keep the shift from overflowing; the result is then scaled by a
/// factor drawn uniformly from `[0.5, 1.0)`.
pub fn backoff_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    let capped = base.saturating_mul(1u32 << attempt.min(31)).min(max);
    let jitter: f64 = rand::rng().random_range(0.5..1.0);
    capped.mul_f64(jitter)
}

/// Run `operation` until it succeeds, fails terminally, or exhausts the
/// retry budget.
///
/// ## Delay selection
///
/// A server-suggested wait ([`ApiError::retry_delay`]) wins over computed
/// backoff but is still capped at `config.max_delay`.
///
/// ## Error identity
///
/// The returned error is the exact value produced by the last call to
/// `operation`, never rewrapped, so upstream `match`es on [`ApiError`]
/// variants keep working.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_transient() {
                    return Err(err);
                }
                if attempt >= config.max_retries {
                    warn!(
                        attempts = attempt + 1,
                        error = %err,
                        "github retries exhausted"
                    );
                    return Err(err);
                }
                let delay = match err.retry_delay() {
                    Some(suggested) => suggested.min(config.max_delay),
                    None => backoff_delay(config.base_delay, config.max_delay, attempt),
                };
                attempt += 1;
                if let Some(on_retry) = &config.on_retry {
                    on_retry(&err, attempt, delay);
                }
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient github error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
