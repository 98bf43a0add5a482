//! Bounded retry with exponential backoff.
//!
//! Used only around the batch identity lookup. Merging lookup results into
//! records is local and is never retried.

use std::time::Duration;

use crate::config::RetryConfig;

/// Maximum retry delay capped at 1 minute
const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Retry bookkeeping for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryState {
    /// Number of retries made so far (the first attempt is not a retry)
    pub retries: usize,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_retry(&mut self) {
        self.retries += 1;
    }

    /// Total attempts made, counting the first one.
    pub fn attempts(&self) -> usize {
        self.retries + 1
    }
}

/// Decision after a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay
    Retry(Duration),
    /// Stop with reason
    GiveUp(String),
}

/// Calculate exponential backoff delay for a given retry number.
///
/// Formula: delay = base_delay * (backoff_multiplier ^ retry)
/// Capped at MAX_RETRY_DELAY_MS to prevent overflow.
pub fn calculate_backoff_delay(retry: usize, base_delay_ms: u64, backoff_multiplier: f64) -> u64 {
    let delay = (base_delay_ms as f64) * backoff_multiplier.powi(retry as i32);

    if delay > MAX_RETRY_DELAY_MS as f64 {
        MAX_RETRY_DELAY_MS
    } else {
        delay as u64
    }
}

/// Decide whether a failed attempt should be retried.
///
/// # Edge Cases
/// * Non-transient error → GiveUp
/// * max_retries = 0 → first failure is final
/// * Exceeded max_retries → GiveUp
pub fn decide_retry(state: &RetryState, transient: bool, config: &RetryConfig) -> RetryDecision {
    if !transient {
        return RetryDecision::GiveUp("error is not transient".to_string());
    }

    if config.max_retries == 0 {
        return RetryDecision::GiveUp("max_retries is 0".to_string());
    }

    if state.retries >= config.max_retries {
        return RetryDecision::GiveUp(format!(
            "Exceeded max retries ({}/{})",
            state.retries, config.max_retries
        ));
    }

    let delay_ms = calculate_backoff_delay(
        state.retries,
        config.retry_delay_ms,
        config.backoff_multiplier,
    );

    RetryDecision::Retry(Duration::from_millis(delay_ms))
}

/// The last error of an operation that ran out of attempts.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: usize,
    pub error: E,
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// retry budget is spent. Sleeps between attempts.
pub fn run_with_retry<T, E, F>(
    config: &RetryConfig,
    is_transient: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let mut state = RetryState::new();
    loop {
        let error = match op() {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match decide_retry(&state, is_transient(&error), config) {
            RetryDecision::Retry(delay) => {
                tracing::warn!(
                    attempt = state.attempts(),
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "attempt failed, retrying"
                );
                std::thread::sleep(delay);
                state.record_retry();
            }
            RetryDecision::GiveUp(reason) => {
                tracing::debug!(attempts = state.attempts(), %reason, "giving up");
                return Err(RetryExhausted {
                    attempts: state.attempts(),
                    error,
                });
            }
        }
    }
}
