/*!
 * RAII Lock Guards
 *
 * Scoped acquisition of the fair reader-writer lock.
 *
 * ## Design Principles
 *
 * 1. **Type-State Pattern**: Access mode encoded in the guard type
 * 2. **Exact Release**: A guard releases the mode it acquired, never the
 *    mode inferred from the lock's state
 * 3. **Zero-Cost**: Compiles to the manual lock/unlock pair
 *
 * ## Example
 *
 * ```rust
 * use fair_rwlock::core::sync::FairReadWriteLock;
 * use std::time::Duration;
 *
 * let lock = FairReadWriteLock::new("replication-status");
 * let guard = lock.try_write_for(Duration::from_millis(50))?;
 * // touch the guarded state
 * drop(guard);
 * # Ok::<(), fair_rwlock::LockError>(())
 * ```
 */

mod lock;

pub use lock::{AccessMode, Exclusive, LockGuard, ReadGuard, Shared, WriteGuard};
