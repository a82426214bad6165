//! Exponential backoff schedule for retried attempts.
//!
//! `delay_after(n)` is the pause inserted after failed attempt `n`
//! (0-based): `base × 2^n`. With the default 1s base the schedule is
//! 1000 ms, 2000 ms, 4000 ms. Computations that would overflow saturate to
//! [`MAX_BACKOFF`].

use std::time::Duration;

/// Delays saturate at one minute.
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Errors returned by backoff configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackoffError {
    #[error("cap must be greater than zero")]
    CapMustBePositive,

    #[error("cap ({cap:?}) must be >= base ({base:?})")]
    CapLessThanBase { base: Duration, cap: Duration },
}

/// Exponential backoff with an optional cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    cap: Option<Duration>,
}

impl Backoff {
    /// Backoff doubling from `base`.
    pub fn exponential(base: Duration) -> Self {
        Self { base, cap: None }
    }

    /// Cap every delay at `cap`. Rejects a zero cap and a cap below `base`.
    pub fn with_cap(mut self, cap: Duration) -> Result<Self, BackoffError> {
        if cap.is_zero() {
            return Err(BackoffError::CapMustBePositive);
        }
        if cap < self.base {
            return Err(BackoffError::CapLessThanBase { base: self.base, cap });
        }
        self.cap = Some(cap);
        Ok(self)
    }

    /// Pause scheduled after failed attempt `attempt` (0-based).
    pub fn delay_after(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        let multiplier = 2u128.saturating_pow(exponent);
        let nanos = self.base.as_nanos().saturating_mul(multiplier);
        let delay = Duration::from_nanos(nanos.min(MAX_BACKOFF.as_nanos()) as u64);
        let capped = self.cap.map(|cap| delay.min(cap)).unwrap_or(delay);
        capped.min(MAX_BACKOFF)
    }
}

impl Default for Backoff {
    /// The demo's schedule: 1s base, so 1000/2000/4000 ms between attempts.
    fn default() -> Self {
        Self::exponential(Duration::from_millis(1000))
    }
}
