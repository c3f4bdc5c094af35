/*!
 * Lock Monitoring
 * Structured tracing for lock holders
 */

mod tracer;

pub use tracer::{init_tracing, span_hold, HoldSpan, SLOW_HOLD_THRESHOLD};
