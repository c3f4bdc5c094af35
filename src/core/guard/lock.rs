/*!
 * Lock Guards with Type-State Pattern
 *
 * Scoped holds on a `FairReadWriteLock` whose access mode is encoded in the
 * type system. Dropping a guard releases exactly the mode it acquired.
 */

use crate::core::errors::{LockError, LockResult};
use crate::core::sync::{Acquire, BlockObserver, FairReadWriteLock, LockMode};
use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

mod sealed {
    pub trait Sealed {}
}

/// Access mode marker trait
pub trait AccessMode: sealed::Sealed + Send + Sync + 'static {
    const MODE: LockMode;
}

/// Type marker for shared (read) access
pub struct Shared;
impl sealed::Sealed for Shared {}
impl AccessMode for Shared {
    const MODE: LockMode = LockMode::Read;
}

/// Type marker for exclusive (write) access
pub struct Exclusive;
impl sealed::Sealed for Exclusive {}
impl AccessMode for Exclusive {
    const MODE: LockMode = LockMode::Write;
}

/// Held lock in mode `M`
///
/// # Type States
///
/// - `LockGuard<Shared>` (`ReadGuard`): one of possibly many readers
/// - `LockGuard<Exclusive>` (`WriteGuard`): the sole writer
///
/// # Example
///
/// ```rust
/// use fair_rwlock::core::sync::FairReadWriteLock;
///
/// let lock = FairReadWriteLock::new("engine-selection");
/// {
///     let _read = lock.read();
///     assert!(lock.is_locked_read());
/// } // released here
/// assert!(!lock.is_locked());
/// ```
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, M: AccessMode> {
    lock: &'a FairReadWriteLock,
    _mode: PhantomData<M>,
}

/// Shared hold
pub type ReadGuard<'a> = LockGuard<'a, Shared>;

/// Exclusive hold
pub type WriteGuard<'a> = LockGuard<'a, Exclusive>;

impl<'a, M: AccessMode> LockGuard<'a, M> {
    /// Wrap an acquisition that already succeeded
    fn acquired(lock: &'a FairReadWriteLock) -> Self {
        Self {
            lock,
            _mode: PhantomData,
        }
    }

    fn from_outcome(
        lock: &'a FairReadWriteLock,
        outcome: Acquire,
        started: Instant,
    ) -> LockResult<Self> {
        match outcome {
            Acquire::Acquired => Ok(Self::acquired(lock)),
            Acquire::TimedOut => Err(LockError::Timeout {
                mode: M::MODE,
                waited_ms: started.elapsed().as_millis() as u64,
            }),
            Acquire::Abandoned => Err(LockError::Abandoned { mode: M::MODE }),
        }
    }

    /// The lock this guard holds
    #[inline]
    pub fn lock(&self) -> &'a FairReadWriteLock {
        self.lock
    }

    #[inline]
    pub fn mode(&self) -> LockMode {
        M::MODE
    }

    /// Release before the end of scope
    #[inline]
    pub fn unlock(self) {
        drop(self);
    }
}

impl<M: AccessMode> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        match M::MODE {
            LockMode::Read => self.lock.unlock_read(),
            LockMode::Write => self.lock.unlock_write(),
        }
    }
}

impl<M: AccessMode> fmt::Debug for LockGuard<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("lock", &self.lock.name())
            .field("mode", &M::MODE)
            .finish()
    }
}

impl FairReadWriteLock {
    /// Block until shared access is granted, releasing it when the guard drops
    pub fn read(&self) -> ReadGuard<'_> {
        self.read_lock();
        LockGuard::acquired(self)
    }

    /// Block until exclusive access is granted, releasing it when the guard drops
    pub fn write(&self) -> WriteGuard<'_> {
        self.write_lock();
        LockGuard::acquired(self)
    }

    /// Shared access within `timeout`
    pub fn try_read_for(&self, timeout: Duration) -> LockResult<ReadGuard<'_>> {
        let started = Instant::now();
        let outcome = self.acquire(LockMode::Read, Instant::now().checked_add(timeout));
        LockGuard::from_outcome(self, outcome, started)
    }

    /// Exclusive access within `timeout`
    pub fn try_write_for(&self, timeout: Duration) -> LockResult<WriteGuard<'_>> {
        let started = Instant::now();
        let outcome = self.acquire(LockMode::Write, Instant::now().checked_add(timeout));
        LockGuard::from_outcome(self, outcome, started)
    }

    /// Shared access within `timeout`, consulting `observer` while blocked
    pub fn try_read_with<O: BlockObserver>(
        &self,
        timeout: Duration,
        observer: O,
    ) -> LockResult<ReadGuard<'_>> {
        let started = Instant::now();
        let outcome = self.acquire_observed(LockMode::Read, timeout, observer);
        LockGuard::from_outcome(self, outcome, started)
    }

    /// Exclusive access within `timeout`, consulting `observer` while blocked
    pub fn try_write_with<O: BlockObserver>(
        &self,
        timeout: Duration,
        observer: O,
    ) -> LockResult<WriteGuard<'_>> {
        let started = Instant::now();
        let outcome = self.acquire_observed(LockMode::Write, timeout, observer);
        LockGuard::from_outcome(self, outcome, started)
    }
}
