
use std::time::Duration;

use tracing::{debug, error, warn};

use super::ProviderError;

const EXPONENTIAL_BACKOFF_BASE: u32 = 2;

/// Something that can block the current thread for a while.
///
/// Production code sleeps for real; tests record the requested delays instead.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    #[inline]
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    #[inline]
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Bounded retry with exponential backoff.
///
/// Only transient provider errors are retried. The delay after attempt `n`
/// is `base_delay * 2^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    #[inline]
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first call; zero is treated as one.
    #[inline]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after the given (1-based) failed attempt.
    #[inline]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = EXPONENTIAL_BACKOFF_BASE
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent. The closure receives the 1-based attempt number.
    #[inline]
    pub fn run<T, S, F>(&self, sleeper: &S, mut operation: F) -> Result<T, ProviderError>
    where
        S: Sleeper + ?Sized,
        F: FnMut(u32) -> Result<T, ProviderError>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            debug!("Embedding request attempt {}/{}", attempt, self.max_attempts);

            match operation(attempt) {
                Ok(value) => {
                    debug!("Request succeeded on attempt {}", attempt);
                    return Ok(value);
                }
                Err(error) if !error.is_transient() => {
                    warn!("Non-retryable error: {}", error);
                    return Err(error);
                }
                Err(error) => {
                    warn!(
                        "Attempt {}/{} failed: {}",
                        attempt, self.max_attempts, error
                    );

                    if attempt < self.max_attempts {
                        let delay = self.delay_after(attempt);
                        debug!("Waiting {:?} before retry", delay);
                        sleeper.sleep(delay);
                    }

                    last_error = Some(error);
                }
            }
        }

        error!("All {} retry attempts failed", self.max_attempts);

        let last = last_error
            .unwrap_or_else(|| ProviderError::Transient("no attempt was made".to_string()));
        Err(ProviderError::Exhausted {
            attempts: self.max_attempts,
            last: Box::new(last),
        })
    }
}
