/*!
 * Lock Configuration
 *
 * Runtime tuning for timed and observer-driven acquisition
 */

use crate::core::limits::{
    DEFAULT_POLL_TIMEOUT, DEFAULT_RECHECK_INTERVAL, MIN_RECHECK_INTERVAL,
    RELAXED_RECHECK_INTERVAL, RESPONSIVE_RECHECK_INTERVAL,
};
use std::time::Duration;

/// Fair lock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockConfig {
    /// Wait slice between `on_recheck` calls for observer-driven acquisition
    pub recheck_interval: Duration,
    /// Timeout used by `try_*_lock_now`
    pub poll_timeout: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            recheck_interval: DEFAULT_RECHECK_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl LockConfig {
    /// Configuration for callers that must notice cancellation quickly
    pub const fn responsive() -> Self {
        Self {
            recheck_interval: RESPONSIVE_RECHECK_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Configuration for callers that rarely cancel
    pub const fn relaxed() -> Self {
        Self {
            recheck_interval: RELAXED_RECHECK_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Set the re-check slice, clamped to `MIN_RECHECK_INTERVAL`
    pub fn with_recheck_interval(mut self, interval: Duration) -> Self {
        self.recheck_interval = interval.max(MIN_RECHECK_INTERVAL);
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Re-check slice actually used, never below the floor
    #[inline]
    pub(crate) fn effective_recheck_interval(&self) -> Duration {
        self.recheck_interval.max(MIN_RECHECK_INTERVAL)
    }
}
