/*!
 * Lock Tracing
 * Structured tracing setup and critical-section spans using the tracing crate
 *
 * Features:
 * - JSON-formatted logs for structured parsing
 * - Hold-time spans around guarded critical sections
 * - Slow-hold warnings with structured fields
 */

use crate::core::sync::LockMode;
use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Holds longer than this are reported at warn level
pub const SLOW_HOLD_THRESHOLD: Duration = Duration::from_millis(10);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - FAIR_RWLOCK_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("FAIR_RWLOCK_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Span covering one critical section held under a lock
///
/// Records the hold duration when dropped; drop it right after releasing.
pub struct HoldSpan {
    span: tracing::Span,
    start: Instant,
    lock: String,
    mode: LockMode,
}

impl HoldSpan {
    pub fn new(lock: &str, mode: LockMode) -> Self {
        let span = span!(
            Level::DEBUG,
            "hold",
            lock = lock,
            mode = %mode,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            lock: lock.to_string(),
            mode,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for HoldSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration > SLOW_HOLD_THRESHOLD {
            warn!(
                lock = %self.lock,
                mode = %self.mode,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow critical section"
            );
        } else {
            debug!(
                lock = %self.lock,
                mode = %self.mode,
                duration_us = duration.as_micros() as u64,
                "critical section completed"
            );
        }
    }
}

/// Start a hold span for `lock` in `mode`
pub fn span_hold(lock: &str, mode: LockMode) -> HoldSpan {
    HoldSpan::new(lock, mode)
}
