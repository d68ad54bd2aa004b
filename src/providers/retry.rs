//! Retry configuration, delay calculation, and the retrying client decorator.
//!
//! [`RetryingReasoningClient`] wraps any [`ReasoningClient`] and retries
//! transient failures with exponential backoff before giving up. Permanent
//! errors are returned on the first attempt.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;

use crate::telemetry;

use super::traits::{ReasoningClient, ReasoningRequest};
use crate::types::DecisionResult;
use crate::Result;

/// Configuration for retry behaviour on transient errors.
///
/// ```rust
/// # use crude_or_rude::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(3)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 2.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries. Default: 10s.
    pub max_delay: Duration,
    /// Whether to randomise delays. Default: true.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single attempt, no retry.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Backoff for a 0-indexed attempt: `initial_delay * 2^attempt`, capped at `max_delay`.
    ///
    /// Does not include jitter.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Delay actually slept before the next attempt.
    ///
    /// A `retry_after` hint wins over the computed backoff but is capped at
    /// `max_delay`. With jitter the backoff is drawn from `[delay / 2, delay]`.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint.min(self.max_delay);
        }
        let delay = self.delay_for_attempt(attempt);
        if !self.jitter || delay.is_zero() {
            return delay;
        }
        let half = delay / 2;
        half + half.mul_f64(rand::thread_rng().gen_range(0.0..=1.0))
    }
}

/// Run `f` until it succeeds, fails permanently, or attempts run out.
pub(crate) async fn with_retry<F, Fut, T>(config: &RetryConfig, client_name: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        let e = match f().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        if !e.is_transient() || attempt + 1 >= max_attempts {
            return Err(e);
        }
        metrics::counter!(telemetry::RETRIES_TOTAL,
            "client" => client_name.to_owned(),
        )
        .increment(1);
        let delay = config.effective_delay(attempt, e.retry_after());
        warn!(
            client = client_name,
            attempt = attempt + 1,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %e,
            "retrying after transient error"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Decorator that retries transient failures of the inner client.
pub struct RetryingReasoningClient {
    inner: Arc<dyn ReasoningClient>,
    config: RetryConfig,
}

impl RetryingReasoningClient {
    pub fn new(inner: Arc<dyn ReasoningClient>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl ReasoningClient for RetryingReasoningClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn reason(&self, request: &ReasoningRequest<'_>) -> Result<DecisionResult> {
        with_retry(&self.config, self.inner.name(), || self.inner.reason(request)).await
    }
}
