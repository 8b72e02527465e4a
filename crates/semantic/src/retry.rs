//! Retry logic with exponential backoff for embedding API calls.
//!
//! Only transient failures (timeouts, connection errors, 5xx, 429) are retried;
//! anything else returns on the first attempt.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::warn;

use crate::error::SemanticError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first call.
    pub max_retries: u32,
    /// Initial delay between retries (base for exponential backoff) in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub base_delay: Duration,
    /// Maximum delay between retries in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Spread delays by ±25%.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before retry `attempt` (1-based; attempt 0 is the initial call).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        // base_delay * multiplier^(attempt-1)
        let exponential =
            self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi((attempt - 1) as i32);
        let delay_ms = exponential.min(self.max_delay.as_millis() as f64) as u64;

        if self.jitter {
            let jitter_range = delay_ms / 4;
            if jitter_range > 0 {
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos() as u64;
                let jitter = nanos % (jitter_range * 2);
                return Duration::from_millis(delay_ms.saturating_sub(jitter_range) + jitter);
            }
        }

        Duration::from_millis(delay_ms)
    }
}

/// Outcome of a retried operation.
#[derive(Debug)]
pub struct RetryResult<T> {
    /// The final result (success or last error).
    pub result: Result<T, SemanticError>,
    /// Number of attempts made (1 = first try succeeded).
    pub attempts: u32,
    pub total_duration: Duration,
}

impl<T> RetryResult<T> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, SemanticError> {
        self.result
    }
}

/// Run `operation` until it succeeds, fails with a non-transient error, or the
/// retry budget is spent. `operation` receives the 0-based attempt number.
///
/// # Example
/// ```
/// use semantic::retry::{execute_with_retry_async, RetryConfig};
/// use semantic::SemanticError;
/// use std::time::Duration;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let config = RetryConfig::default().with_base_delay(Duration::from_millis(1));
/// let result = execute_with_retry_async(&config, |attempt| async move {
///     if attempt == 0 {
///         Err(SemanticError::Request("connection reset".into()))
///     } else {
///         Ok("ok")
///     }
/// })
/// .await;
/// assert_eq!(result.attempts, 2);
/// # });
/// ```
pub async fn execute_with_retry_async<T, F, Fut>(
    config: &RetryConfig,
    mut operation: F,
) -> RetryResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, SemanticError>>,
{
    let start = Instant::now();
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(err) if err.is_transient() && attempt < config.max_retries => {
                let delay = config.calculate_delay(attempt + 1);
                warn!(
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "embedding_retry"
                );
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                attempt += 1;
            }
            Err(err) => {
                return RetryResult {
                    result: Err(err),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
        }
    }
}
