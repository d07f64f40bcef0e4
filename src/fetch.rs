//! The source fetch contract and the retry wrapper around it.
//!
//! Every source adapter implements [`NewsSource`]; the orchestrator only ever
//! calls adapters through [`fetch_with_retry`], which retries failed fetches
//! with exponential backoff and degrades to an empty item list once the
//! attempts run out. A broken source therefore costs its own items and
//! nothing else: no error from this module ever reaches the collection loop.

use crate::models::NewsItem;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Why a single fetch attempt failed. The retry wrapper treats every variant
/// the same; the classification exists for logs and for callers that invoke
/// adapters directly.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// A source of news items. Implementations own their endpoint, parsing, and
/// per-item hygiene; they surface transport or decode problems as
/// [`FetchError`] and leave retrying to the caller.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Stable identifier used as the key in snapshots and in logs.
    fn name(&self) -> &'static str;

    /// Fetch the current items from the source, normalized and in the order
    /// the source presents them.
    async fn fetch(&self) -> Result<Vec<NewsItem>, FetchError>;
}

/// Retry schedule for [`fetch_with_retry`].
///
/// Defaults: three attempts with delays of 2 s and 4 s between them. The
/// delay after failed attempt `n` is `backoff_base * 2^(n-1)`, capped at
/// `max_delay`; no delay follows the final attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor).min(self.max_delay)
    }
}

/// Fetch from `source`, retrying per `policy`. Returns the fetched items on
/// the first success; returns an empty list once every attempt has failed.
/// Never returns an error, so a dead source looks identical to a quiet one.
pub async fn fetch_with_retry(source: &dyn NewsSource, policy: &RetryPolicy) -> Vec<NewsItem> {
    for attempt in 1..=policy.max_attempts {
        match source.fetch().await {
            Ok(items) => {
                debug!(
                    source = source.name(),
                    attempt,
                    items = items.len(),
                    "fetch succeeded"
                );
                return items;
            }
            Err(err) if attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    source = source.name(),
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                error!(
                    source = source.name(),
                    attempts = policy.max_attempts,
                    error = %err,
                    "fetch failed, giving up"
                );
            }
        }
    }
    Vec::new()
}
