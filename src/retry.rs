//! Retry with exponential backoff
//!
//! For operations that call into network services. The guarded subprocess
//! path never retries; a git failure is terminal for the invocation.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub retries: u32,

    /// Backoff multiplier between attempts
    pub factor: f64,

    /// Delay before the first retry
    pub min_delay: Duration,

    /// Upper bound on any single delay
    pub max_delay: Duration,

    /// Apply jitter to each delay
    pub randomize: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            retries: 3,
            factor: 2.0,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            randomize: true,
        }
    }
}

impl RetryConfig {
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.min_delay.as_secs_f64() * self.factor.powi(attempt as i32);
        let mut delay = base.min(self.max_delay.as_secs_f64());
        if self.randomize {
            delay *= rand::thread_rng().gen_range(1.0..2.0);
            delay = delay.min(self.max_delay.as_secs_f64());
        }
        Duration::from_secs_f64(delay)
    }
}

/// Run an async operation, retrying on failure with exponential backoff.
///
/// Each failed attempt logs a warning; the final failure is returned as-is.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = config.retries + 1;
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                let retries_left = attempts - attempt;
                tracing::warn!(
                    "Operation failed (attempt {}/{}): {}. {}",
                    attempt,
                    attempts,
                    error,
                    if retries_left > 0 {
                        "Retrying..."
                    } else {
                        "No more retries left."
                    }
                );
                if retries_left == 0 {
                    return Err(error);
                }
                tokio::time::sleep(config.delay_for_attempt(attempt - 1)).await;
            }
        }
    }
}
