/*!
 * Lock Limits and Constants
 *
 * Centralized timing constants for the fair reader-writer lock.
 * Performance-critical constants are marked with [PERF].
 */

use std::time::Duration;

// =============================================================================
// TIMED ACQUISITION
// =============================================================================

/// Default slice between cooperative re-checks (100ms)
/// Observer-driven acquisitions wake at least this often to ask the caller
/// whether waiting should continue
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Re-check slice for latency-sensitive callers (10ms)
pub const RESPONSIVE_RECHECK_INTERVAL: Duration = Duration::from_millis(10);

/// Re-check slice for callers that rarely cancel (1s)
pub const RELAXED_RECHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Lower bound for any re-check slice (1ms)
/// [PERF] Shorter slices degrade into busy polling of the internal mutex
pub const MIN_RECHECK_INTERVAL: Duration = Duration::from_millis(1);

/// Timeout used when a try-acquire is issued without one (zero)
/// An effectively immediate poll: admission is evaluated once, nothing is queued
/// for longer than the mutex hold
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::ZERO;

// =============================================================================
// HOLDER STATE ENCODING
// =============================================================================

/// Holder state while a single writer owns the lock
pub const WRITER_HOLDS: i64 = -1;

/// Holder state while nobody owns the lock
pub const UNHELD: i64 = 0;
