//! Retry budget and backoff delays.
//!
//! The delay before retry `k` (1-based) is drawn uniformly from
//! `[min_delay * k, max_delay)`. The lower bound widens with every retry
//! while the upper bound stays fixed, so late retries cluster near
//! `max_delay`. Once `min_delay * k` reaches `max_delay` the delay is
//! exactly `max_delay`.

use std::time::Duration;

use distpush_config::{DeployOptions, RetryMode};
use distpush_transfer::TransferError;
use rand::Rng;

/// Retry budget and delay bounds for one upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Base of the scaling lower bound.
    pub min_delay: Duration,
    /// Fixed upper bound (exclusive unless the bounds collapse).
    pub max_delay: Duration,
    /// Retries allowed after the first attempt.
    ///
    /// A client that keeps failing is invoked `max_retries + 1` times. A
    /// `maxRetries` setting carried over from an uploader that counted total
    /// invocations yields one extra attempt here.
    pub max_retries: u32,
    pub mode: RetryMode,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_options(&DeployOptions::default())
    }
}

impl RetryPolicy {
    pub fn from_options(options: &DeployOptions) -> Self {
        Self {
            min_delay: options.min_retry(),
            max_delay: options.max_retry(),
            max_retries: options.max_retries,
            mode: options.retry_mode,
        }
    }

    /// Bounds `[lower, upper]` of the delay before retry `retry`.
    pub fn delay_bounds(&self, retry: u32) -> (Duration, Duration) {
        let lower = self.min_delay.saturating_mul(retry).min(self.max_delay);
        (lower, self.max_delay)
    }

    /// Draws the delay before retry `retry` (1-based).
    pub fn delay_for_retry<R: Rng + ?Sized>(&self, retry: u32, rng: &mut R) -> Duration {
        let (lower, upper) = self.delay_bounds(retry);
        let lower_ms = millis(lower);
        let upper_ms = millis(upper);
        if lower_ms >= upper_ms {
            return upper;
        }
        Duration::from_millis(rng.gen_range(lower_ms..upper_ms))
    }

    /// Whether a failed attempt may be followed by another one.
    ///
    /// `retries` is the number of retries already made.
    pub fn allows_retry(&self, retries: u32, err: &TransferError) -> bool {
        if retries >= self.max_retries {
            return false;
        }
        match self.mode {
            RetryMode::RetryAll => true,
            RetryMode::FailFast => err.is_retryable(),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
