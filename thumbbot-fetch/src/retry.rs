//! Retry policy with exponential backoff, jitter and cancellable sleeps.

use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default initial backoff delay.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default cap for any single wait.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Default jitter as a fraction of the wait (plus or minus).
pub const DEFAULT_JITTER: f64 = 0.25;

// ============================================================================
// Retry Policy
// ============================================================================

/// Policy for retrying rate-limited requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Jitter fraction applied to each wait, in `[0, 1)`.
    pub jitter: f64,
}

impl RetryPolicy {
    /// Creates a new retry policy with default delays.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the jitter fraction, clamped to `[0, 0.99]`.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 0.99);
        self
    }

    /// Calculates the un-jittered delay for a given retry number (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Doubles `current`, capped at the maximum delay.
    pub fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }

    /// Computes how long to wait before the next attempt.
    ///
    /// A server-provided `retry_after` replaces the backoff delay. Jitter is
    /// applied to whichever base is used and the result is capped.
    pub fn wait_duration(&self, retry_after: Option<Duration>, current: Duration) -> Duration {
        let base = retry_after.filter(|d| !d.is_zero()).unwrap_or(current);
        let factor = if self.jitter > 0.0 {
            1.0 + rand::thread_rng().gen_range(-self.jitter..=self.jitter)
        } else {
            1.0
        };
        base.mul_f64(factor).min(self.max_delay)
    }

    /// Starts a backoff sequence for one operation.
    pub fn backoff(&self) -> Backoff {
        Backoff {
            policy: self.clone(),
            remaining: self.max_retries,
            delay: self.base_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

// ============================================================================
// Backoff
// ============================================================================

/// Per-operation retry state: remaining budget and the current delay.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    remaining: u32,
    delay: Duration,
}

impl Backoff {
    /// Retries left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current backoff delay before jitter.
    pub fn current_delay(&self) -> Duration {
        self.delay
    }

    /// Consumes one retry and returns how long to wait, or `None` when the
    /// budget is spent.
    pub fn next_wait(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        let wait = self.policy.wait_duration(retry_after, self.delay);
        self.delay = self.policy.next_delay(self.delay);
        self.remaining -= 1;
        Some(wait)
    }
}

// ============================================================================
// Cancellable Sleep
// ============================================================================

/// Sleeps for `duration` unless `cancel` fires first.
pub async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> Result<(), FetchError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(FetchError::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(8));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(10).with_base_delay(Duration::from_secs(10));

        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(30));
        assert_eq!(policy.next_delay(Duration::from_secs(20)), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_after_wait_stays_within_jitter() {
        let policy = RetryPolicy::default();
        for _ in 0..500 {
            let wait = policy.wait_duration(Some(Duration::from_secs(2)), Duration::from_secs(1));
            assert!(wait >= Duration::from_millis(1500), "{wait:?}");
            assert!(wait <= Duration::from_millis(2500), "{wait:?}");
        }
    }

    #[test]
    fn test_wait_without_jitter_uses_backoff_delay() {
        let policy = RetryPolicy::default().with_jitter(0.0);
        assert_eq!(
            policy.wait_duration(None, Duration::from_secs(4)),
            Duration::from_secs(4)
        );
        assert_eq!(
            policy.wait_duration(Some(Duration::ZERO), Duration::from_secs(4)),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn test_wait_is_capped() {
        let policy = RetryPolicy::default();
        let wait = policy.wait_duration(Some(Duration::from_secs(120)), Duration::from_secs(1));
        assert_eq!(wait, Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_budget() {
        let policy = RetryPolicy::new(3).with_jitter(0.0);
        let mut backoff = policy.backoff();

        assert_eq!(backoff.next_wait(None), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next_wait(None), Some(Duration::from_secs(2)));
        assert_eq!(backoff.next_wait(None), Some(Duration::from_secs(4)));
        assert_eq!(backoff.remaining(), 0);
        assert_eq!(backoff.next_wait(None), None);
    }

    #[test]
    fn test_no_retry() {
        let mut backoff = RetryPolicy::no_retry().backoff();
        assert_eq!(backoff.next_wait(None), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes() {
        let cancel = CancellationToken::new();
        assert!(sleep_or_cancel(Duration::from_secs(5), &cancel).await.is_ok());
    }

    #[tokio::test]
    async fn test_sleep_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = sleep_or_cancel(Duration::from_secs(3600), &cancel).await;
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }
}
