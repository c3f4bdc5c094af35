/*!
 * Synchronization Traits
 *
 * The observer contract for cooperative, bounded lock acquisition.
 *
 * # Design: Observer Trait Over Callback Triad
 *
 * Embedding code that needs to reassess external cancellation while blocked
 * implements `BlockObserver`. Callers that only have closures at hand can use
 * `Callbacks`, which adapts three closures to the trait.
 */

/// Hooks invoked while a bounded acquisition has to block
///
/// Call order for one acquisition attempt that cannot proceed immediately:
///
/// 1. `on_block()` once. Returning `false` abandons the attempt before any
///    queue entry is created, and nothing else is called.
/// 2. `on_recheck()` each time a wait slice elapses without admission.
///    Returning `false` aborts the attempt as expired.
/// 3. `on_unblock(expired)` exactly once after waiting ends.
///
/// All hooks run with the lock's internal mutex released.
pub trait BlockObserver {
    /// Called before the caller is queued; return `false` to give up
    fn on_block(&mut self) -> bool {
        true
    }

    /// Called once the attempt resolved, `expired` is `true` on failure
    fn on_unblock(&mut self, expired: bool) {
        let _ = expired;
    }

    /// Called after every wait slice that ended without admission
    fn on_recheck(&mut self) -> bool {
        true
    }
}

/// Observer that never intervenes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BlockObserver for NoopObserver {}

/// Closure adapter for `BlockObserver`
///
/// # Examples
///
/// ```
/// use fair_rwlock::core::sync::{Callbacks, FairReadWriteLock};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::time::Duration;
///
/// let lock = FairReadWriteLock::new("collections");
/// let shutting_down = AtomicBool::new(false);
///
/// let mut observer = Callbacks::new(
///     || true,
///     |_expired| {},
///     || !shutting_down.load(Ordering::Relaxed),
/// );
/// assert!(lock.try_write_lock_with(Duration::from_millis(10), &mut observer));
/// lock.unlock_write();
/// ```
pub struct Callbacks<B, U, R>
where
    B: FnMut() -> bool,
    U: FnMut(bool),
    R: FnMut() -> bool,
{
    on_block: B,
    on_unblock: U,
    on_recheck: R,
}

impl<B, U, R> Callbacks<B, U, R>
where
    B: FnMut() -> bool,
    U: FnMut(bool),
    R: FnMut() -> bool,
{
    pub fn new(on_block: B, on_unblock: U, on_recheck: R) -> Self {
        Self {
            on_block,
            on_unblock,
            on_recheck,
        }
    }
}

impl<B, U, R> BlockObserver for Callbacks<B, U, R>
where
    B: FnMut() -> bool,
    U: FnMut(bool),
    R: FnMut() -> bool,
{
    #[inline]
    fn on_block(&mut self) -> bool {
        (self.on_block)()
    }

    #[inline]
    fn on_unblock(&mut self, expired: bool) {
        (self.on_unblock)(expired)
    }

    #[inline]
    fn on_recheck(&mut self) -> bool {
        (self.on_recheck)()
    }
}

impl<O: BlockObserver + ?Sized> BlockObserver for &mut O {
    fn on_block(&mut self) -> bool {
        (**self).on_block()
    }

    fn on_unblock(&mut self, expired: bool) {
        (**self).on_unblock(expired)
    }

    fn on_recheck(&mut self) -> bool {
        (**self).on_recheck()
    }
}
