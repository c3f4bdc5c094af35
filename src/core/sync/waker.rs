/*!
 * Condvar-Based Wakeup Handle
 *
 * A blocked caller suspends on a `Waker` while handing the lock's internal
 * mutex back, and reacquires it on wake (monitor discipline). Built on
 * parking_lot::Condvar, which never poisons and reports how many sleeping
 * threads a notify reached.
 *
 * Every `Waker` must only ever be paired with the one internal mutex of the
 * lock that created it.
 */

use parking_lot::{Condvar, MutexGuard};
use std::time::Instant;

/// Wait/wake primitive owned by one blocked writer or shared by all readers
#[derive(Debug, Default)]
pub struct Waker {
    condvar: Condvar,
}

impl Waker {
    pub const fn new() -> Self {
        Self {
            condvar: Condvar::new(),
        }
    }

    /// Suspend until notified, releasing `guard` while asleep
    #[inline]
    pub fn wait<T>(&self, guard: &mut MutexGuard<'_, T>) {
        self.condvar.wait(guard);
    }

    /// Suspend until notified or `deadline` passes
    ///
    /// Returns `true` if woken by notify, `false` if the deadline elapsed.
    #[inline]
    pub fn wait_until<T>(&self, guard: &mut MutexGuard<'_, T>, deadline: Instant) -> bool {
        !self.condvar.wait_until(guard, deadline).timed_out()
    }

    /// Wake every thread sleeping on this handle
    ///
    /// Returns how many threads were asleep. A queued caller that is between
    /// waits (running an observer hook) is not counted; it re-checks admission
    /// before sleeping again.
    #[inline]
    pub fn wake_all(&self) -> usize {
        self.condvar.notify_all()
    }
}
