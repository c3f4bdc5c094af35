/*!
 * Fair Reader-Writer Lock
 *
 * Guards shared engine state (collection metadata, storage-engine selection,
 * cluster bookkeeping) across request-handling threads.
 *
 * # Admission
 *
 * Every decision is made under one internal mutex:
 * - A writer proceeds iff the lock is unheld and either no reader is queued
 *   or the preferred phase is `Write`
 * - A reader proceeds iff no writer holds and either no writer is queued or
 *   the preferred phase is `Read`
 *
 * Each successful acquisition flips the preferred phase to the opposite
 * class. When both classes are queued this drains one batch of the waiting
 * class before handing control back, so neither class starves the other.
 *
 * # Waiting
 *
 * A caller that cannot proceed registers a `Notifiable` in its class's queue
 * and sleeps on a `Waker` with the internal mutex released. Writers sleep on
 * their own waker; all readers share one, so a read-queue wake is a single
 * broadcast. The registration is an RAII value: whether the attempt
 * succeeds, times out, is abandoned, or unwinds, the entry leaves its queue
 * before the call returns.
 */

use super::config::LockConfig;
use super::queue::{Notifiable, NotifyQueue};
use super::stats::{LockStats, LockStatsSnapshot};
use super::traits::BlockObserver;
use super::types::{LockMode, Ticket, TicketCounter};
use super::waker::Waker;
use crate::core::errors::LockError;
use crate::core::limits::{UNHELD, WRITER_HOLDS};
use parking_lot::{Mutex, MutexGuard};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, trace};

/// How one acquisition attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquire {
    Acquired,
    TimedOut,
    /// An observer declined to block or cancelled on re-check
    Abandoned,
}

impl Acquire {
    #[inline]
    pub(crate) fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

/// State protected by the internal mutex
#[derive(Debug)]
struct LockState {
    /// -1 = one writer, 0 = unheld, N > 0 = N readers
    holder_state: i64,
    next_preferred: LockMode,
    write_queue: NotifyQueue,
    read_queue: NotifyQueue,
    tickets: TicketCounter,
    /// Readers queued at or before this ticket were released as one batch
    read_grant: Option<Ticket>,
}

impl LockState {
    const fn new() -> Self {
        Self {
            holder_state: UNHELD,
            next_preferred: LockMode::Write,
            write_queue: NotifyQueue::new(),
            read_queue: NotifyQueue::new(),
            tickets: TicketCounter::new(),
            read_grant: None,
        }
    }

    fn queue_mut(&mut self, mode: LockMode) -> &mut NotifyQueue {
        match mode {
            LockMode::Read => &mut self.read_queue,
            LockMode::Write => &mut self.write_queue,
        }
    }

    /// Writer admission; a queued writer must also be at the head of its queue
    fn can_write(&self, ticket: Option<Ticket>) -> bool {
        self.holder_state == UNHELD
            && (self.read_queue.is_empty() || self.next_preferred == LockMode::Write)
            && ticket.map_or(true, |t| self.write_queue.head() == Some(t))
    }

    /// Reader admission; a queued reader covered by the current batch grant
    /// only needs the lock to be free of writers
    fn can_read(&self, ticket: Option<Ticket>) -> bool {
        if self.holder_state == WRITER_HOLDS {
            return false;
        }
        if self.write_queue.is_empty() || self.next_preferred == LockMode::Read {
            return true;
        }
        matches!((ticket, self.read_grant), (Some(t), Some(grant)) if t <= grant)
    }

    #[inline]
    fn admits(&self, mode: LockMode, ticket: Option<Ticket>) -> bool {
        match mode {
            LockMode::Read => self.can_read(ticket),
            LockMode::Write => self.can_write(ticket),
        }
    }

    fn claim(&mut self, mode: LockMode) {
        match mode {
            LockMode::Read => self.holder_state += 1,
            LockMode::Write => self.holder_state = WRITER_HOLDS,
        }
        self.next_preferred = mode.opposite();
    }

    /// Release every reader currently queued as one batch
    fn broadcast_readers(&mut self) -> bool {
        match self.read_queue.tail() {
            Some(tail) => {
                self.read_grant = Some(tail);
                self.read_queue.notify_all()
            }
            None => false,
        }
    }

    /// Post-release wake decision: the preferred class first, the other one
    /// only if nobody of the preferred class is queued
    fn wake_waiters(&mut self) {
        match self.next_preferred {
            LockMode::Read => {
                if !self.broadcast_readers() {
                    self.write_queue.notify_one();
                }
            }
            LockMode::Write => {
                if !self.write_queue.notify_one() {
                    self.broadcast_readers();
                }
            }
        }
    }

    /// Wake whoever became admissible because a waiter left without acquiring
    fn wake_admissible(&mut self) {
        let writer_ready = self
            .write_queue
            .head()
            .map_or(false, |head| self.can_write(Some(head)));

        if writer_ready {
            self.write_queue.notify_one();
        } else if !self.read_queue.is_empty() && self.can_read(None) {
            self.read_queue.notify_all();
        }
    }
}

/// A queued acquisition attempt
///
/// Dropping it without `complete` (timeout, abandonment, unwinding) removes
/// the entry and re-runs admission for the remaining waiters.
struct Registration<'r, 'g> {
    state: &'r mut MutexGuard<'g, LockState>,
    waker: Arc<Waker>,
    ticket: Ticket,
    mode: LockMode,
    queued: bool,
}

impl<'r, 'g> Registration<'r, 'g> {
    fn enqueue(state: &'r mut MutexGuard<'g, LockState>, mode: LockMode, waker: Arc<Waker>) -> Self {
        let ticket = state.tickets.issue();
        state
            .queue_mut(mode)
            .add(Notifiable::new(ticket, waker.clone()));
        Self {
            state,
            waker,
            ticket,
            mode,
            queued: true,
        }
    }

    #[inline]
    fn admitted(&self) -> bool {
        self.state.admits(self.mode, Some(self.ticket))
    }

    #[inline]
    fn wait(&mut self) {
        self.waker.wait(&mut *self.state);
    }

    /// Returns `false` once `deadline` elapsed without a wake
    #[inline]
    fn wait_until(&mut self, deadline: Instant) -> bool {
        self.waker.wait_until(&mut *self.state, deadline)
    }

    /// Run `f` with the internal mutex released
    fn unlocked<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        MutexGuard::unlocked(&mut *self.state, f)
    }

    /// Leave the queue after admission
    fn complete(mut self) {
        let ticket = self.ticket;
        self.state.queue_mut(self.mode).remove(ticket);
        self.queued = false;
    }
}

impl Drop for Registration<'_, '_> {
    fn drop(&mut self) {
        if self.queued {
            let ticket = self.ticket;
            self.state.queue_mut(self.mode).remove(ticket);
            self.state.wake_admissible();
        }
    }
}

/// Fair reader-writer lock with FIFO-within-class admission and
/// alternating-phase anti-starvation
///
/// The lock protects no data itself; callers hold it for exactly the span
/// during which the guarded resource is touched. Acquisition and release are
/// not tied to a thread, and re-entrant use (a holder acquiring again in the
/// opposite mode) is undefined and not deadlock-checked.
///
/// # Examples
///
/// ```
/// use fair_rwlock::core::sync::FairReadWriteLock;
/// use std::time::Duration;
///
/// let lock = FairReadWriteLock::new("databases");
///
/// lock.read_lock();
/// lock.read_lock();
/// assert_eq!(lock.holder_state(), 2);
/// assert!(!lock.try_write_lock(Duration::from_millis(5)));
/// lock.unlock_read();
/// lock.unlock();
///
/// lock.write_lock();
/// assert!(lock.is_locked_write());
/// lock.unlock();
/// ```
pub struct FairReadWriteLock {
    name: Cow<'static, str>,
    config: LockConfig,
    state: Mutex<LockState>,
    read_waker: Arc<Waker>,
    stats: LockStats,
}

impl FairReadWriteLock {
    /// Create an unheld lock with default configuration
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_config(name, LockConfig::default())
    }

    pub fn with_config(name: impl Into<Cow<'static, str>>, config: LockConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: Mutex::new(LockState::new()),
            read_waker: Arc::new(Waker::new()),
            stats: LockStats::new(),
        }
    }

    // =========================================================================
    // ACQUISITION
    // =========================================================================

    /// Block until shared access is granted
    pub fn read_lock(&self) {
        self.acquire(LockMode::Read, None);
    }

    /// Block until exclusive access is granted
    pub fn write_lock(&self) {
        self.acquire(LockMode::Write, None);
    }

    /// Try to acquire shared access within `timeout`
    ///
    /// Returns `false` without changing the lock if the timeout elapses first.
    pub fn try_read_lock(&self, timeout: Duration) -> bool {
        self.acquire(LockMode::Read, deadline_after(timeout))
            .is_acquired()
    }

    /// Try to acquire exclusive access within `timeout`
    ///
    /// Returns `false` without changing the lock if the timeout elapses first.
    pub fn try_write_lock(&self, timeout: Duration) -> bool {
        self.acquire(LockMode::Write, deadline_after(timeout))
            .is_acquired()
    }

    /// Poll for shared access using the configured poll timeout
    pub fn try_read_lock_now(&self) -> bool {
        self.try_read_lock(self.config.poll_timeout)
    }

    /// Poll for exclusive access using the configured poll timeout
    pub fn try_write_lock_now(&self) -> bool {
        self.try_write_lock(self.config.poll_timeout)
    }

    /// Try to acquire shared access within `timeout`, consulting `observer`
    /// while blocked
    ///
    /// See [`BlockObserver`] for the call order. Returns `true` on success.
    pub fn try_read_lock_with<O: BlockObserver>(&self, timeout: Duration, observer: O) -> bool {
        self.acquire_observed(LockMode::Read, timeout, observer)
            .is_acquired()
    }

    /// Try to acquire exclusive access within `timeout`, consulting `observer`
    /// while blocked
    ///
    /// See [`BlockObserver`] for the call order. Returns `true` on success.
    pub fn try_write_lock_with<O: BlockObserver>(&self, timeout: Duration, observer: O) -> bool {
        self.acquire_observed(LockMode::Write, timeout, observer)
            .is_acquired()
    }

    /// Blocking or deadline-bounded acquisition (`deadline == None` waits forever)
    pub(crate) fn acquire(&self, mode: LockMode, deadline: Option<Instant>) -> Acquire {
        let mut state = self.state.lock();
        if state.admits(mode, None) {
            self.claim(&mut state, mode, false);
            return Acquire::Acquired;
        }
        if deadline.map_or(false, |d| Instant::now() >= d) {
            self.stats.record_timeout();
            trace!(lock = %self.name, %mode, holder_state = state.holder_state, "poll failed");
            return Acquire::TimedOut;
        }

        let started = Instant::now();
        let mut waiter = Registration::enqueue(&mut state, mode, self.waker_for(mode));
        debug!(
            lock = %self.name,
            %mode,
            ticket = %waiter.ticket,
            holder_state = waiter.state.holder_state,
            "blocking"
        );

        let admitted = loop {
            if waiter.admitted() {
                break true;
            }
            match deadline {
                None => waiter.wait(),
                Some(deadline) => {
                    if !waiter.wait_until(deadline) {
                        break waiter.admitted();
                    }
                }
            }
        };

        if admitted {
            waiter.complete();
            self.claim(&mut state, mode, true);
            debug!(lock = %self.name, %mode, waited = ?started.elapsed(), "admitted");
            Acquire::Acquired
        } else {
            drop(waiter);
            self.stats.record_timeout();
            debug!(lock = %self.name, %mode, waited = ?started.elapsed(), "timed out");
            Acquire::TimedOut
        }
    }

    /// Deadline-bounded acquisition with cooperative re-checks
    pub(crate) fn acquire_observed<O: BlockObserver>(
        &self,
        mode: LockMode,
        timeout: Duration,
        mut observer: O,
    ) -> Acquire {
        let deadline = deadline_after(timeout);
        let mut state = self.state.lock();
        if state.admits(mode, None) {
            self.claim(&mut state, mode, false);
            return Acquire::Acquired;
        }

        if !MutexGuard::unlocked(&mut state, || observer.on_block()) {
            self.stats.record_abandoned();
            debug!(lock = %self.name, %mode, "observer declined to block");
            return Acquire::Abandoned;
        }

        let slice = self.config.effective_recheck_interval();
        let started = Instant::now();
        let mut waiter = Registration::enqueue(&mut state, mode, self.waker_for(mode));
        debug!(
            lock = %self.name,
            %mode,
            ticket = %waiter.ticket,
            holder_state = waiter.state.holder_state,
            "blocking with observer"
        );

        let outcome = loop {
            if waiter.admitted() {
                break Acquire::Acquired;
            }
            let slice_end = Instant::now().checked_add(slice);
            let wake_by = match (deadline, slice_end) {
                (Some(deadline), Some(slice_end)) => Some(deadline.min(slice_end)),
                (Some(deadline), None) => Some(deadline),
                (None, slice_end) => slice_end,
            };
            let woken = match wake_by {
                Some(at) => waiter.wait_until(at),
                None => {
                    waiter.wait();
                    true
                }
            };
            if woken {
                continue;
            }
            if waiter.admitted() {
                break Acquire::Acquired;
            }
            if !waiter.unlocked(|| observer.on_recheck()) {
                break Acquire::Abandoned;
            }
            if deadline.map_or(false, |d| Instant::now() >= d) {
                break Acquire::TimedOut;
            }
        };

        match outcome {
            Acquire::Acquired => {
                waiter.complete();
                self.claim(&mut state, mode, true);
                debug!(lock = %self.name, %mode, waited = ?started.elapsed(), "admitted");
            }
            Acquire::TimedOut => {
                drop(waiter);
                self.stats.record_timeout();
                debug!(lock = %self.name, %mode, waited = ?started.elapsed(), "timed out");
            }
            Acquire::Abandoned => {
                drop(waiter);
                self.stats.record_abandoned();
                debug!(lock = %self.name, %mode, waited = ?started.elapsed(), "abandoned on re-check");
            }
        }
        drop(state);

        // on_unblock runs after dequeue
        observer.on_unblock(!outcome.is_acquired());
        outcome
    }

    fn waker_for(&self, mode: LockMode) -> Arc<Waker> {
        match mode {
            LockMode::Read => self.read_waker.clone(),
            LockMode::Write => Arc::new(Waker::new()),
        }
    }

    fn claim(&self, state: &mut LockState, mode: LockMode, contended: bool) {
        state.claim(mode);
        self.stats.record_acquire(mode, contended);
        trace!(
            lock = %self.name,
            %mode,
            holder_state = state.holder_state,
            next_phase = %state.next_preferred,
            "acquired"
        );
    }

    // =========================================================================
    // RELEASE
    // =========================================================================

    /// Release exclusive access
    ///
    /// # Panics
    ///
    /// Panics if no writer holds the lock.
    pub fn unlock_write(&self) {
        let mut state = self.state.lock();
        if state.holder_state != WRITER_HOLDS {
            self.contract_violation(LockError::NotHeld {
                mode: LockMode::Write,
                holder_state: state.holder_state,
            });
        }
        self.release(&mut state, LockMode::Write);
    }

    /// Release one shared hold
    ///
    /// # Panics
    ///
    /// Panics if no reader holds the lock.
    pub fn unlock_read(&self) {
        let mut state = self.state.lock();
        if state.holder_state <= UNHELD {
            self.contract_violation(LockError::NotHeld {
                mode: LockMode::Read,
                holder_state: state.holder_state,
            });
        }
        self.release(&mut state, LockMode::Read);
    }

    /// Release whichever mode the lock is currently held in
    ///
    /// The mode is inferred from the holder state, so a caller releasing the
    /// wrong mode through this entry point goes undetected.
    ///
    /// # Panics
    ///
    /// Panics if the lock is unheld.
    pub fn unlock(&self) {
        let mut state = self.state.lock();
        match state.holder_state {
            WRITER_HOLDS => self.release(&mut state, LockMode::Write),
            n if n > UNHELD => self.release(&mut state, LockMode::Read),
            _ => self.contract_violation(LockError::NotLocked),
        }
    }

    fn release(&self, state: &mut LockState, mode: LockMode) {
        match mode {
            LockMode::Write => state.holder_state = UNHELD,
            LockMode::Read => state.holder_state -= 1,
        }
        state.wake_waiters();
        self.stats.record_release();
        trace!(
            lock = %self.name,
            %mode,
            holder_state = state.holder_state,
            preferred = %state.next_preferred,
            "released"
        );
    }

    fn contract_violation(&self, err: LockError) -> ! {
        error!(lock = %self.name, error = %err, "lock contract violated");
        panic!("lock '{}': {}", self.name, err);
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// -1 while a writer holds, 0 when unheld, N while N readers hold
    pub fn holder_state(&self) -> i64 {
        self.state.lock().holder_state
    }

    pub fn is_locked(&self) -> bool {
        self.holder_state() != UNHELD
    }

    pub fn is_locked_read(&self) -> bool {
        self.holder_state() > UNHELD
    }

    pub fn is_locked_write(&self) -> bool {
        self.holder_state() == WRITER_HOLDS
    }

    /// Class favoured at the next release
    pub fn preferred_phase(&self) -> LockMode {
        self.state.lock().next_preferred
    }

    /// Number of blocked readers
    pub fn waiting_readers(&self) -> usize {
        self.state.lock().read_queue.len()
    }

    /// Number of blocked writers
    pub fn waiting_writers(&self) -> usize {
        self.state.lock().write_queue.len()
    }

    pub fn stats(&self) -> LockStatsSnapshot {
        self.stats.snapshot()
    }
}

impl fmt::Debug for FairReadWriteLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("FairReadWriteLock");
        d.field("name", &self.name);
        match self.state.try_lock() {
            Some(state) => d
                .field("holder_state", &state.holder_state)
                .field("preferred_phase", &state.next_preferred)
                .field("waiting_readers", &state.read_queue.len())
                .field("waiting_writers", &state.write_queue.len()),
            None => d.field("state", &format_args!("<busy>")),
        };
        d.finish()
    }
}

/// `None` when the deadline is not representable (wait forever)
#[inline]
fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sync::{Callbacks, NoopObserver};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_state_machine_transitions() {
        let lock = FairReadWriteLock::new("test");
        assert_eq!(lock.holder_state(), 0);

        lock.write_lock();
        assert_eq!(lock.holder_state(), -1);
        assert_eq!(lock.preferred_phase(), LockMode::Read);
        lock.unlock_write();
        assert_eq!(lock.holder_state(), 0);

        lock.read_lock();
        lock.read_lock();
        assert_eq!(lock.holder_state(), 2);
        assert_eq!(lock.preferred_phase(), LockMode::Write);
        lock.unlock_read();
        lock.unlock_read();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_release_does_not_flip_phase() {
        let lock = FairReadWriteLock::new("test");
        lock.write_lock();
        lock.unlock_write();
        assert_eq!(lock.preferred_phase(), LockMode::Read);
    }

    #[test]
    fn test_generic_unlock_infers_mode() {
        let lock = FairReadWriteLock::new("test");
        lock.read_lock();
        lock.unlock();
        assert_eq!(lock.holder_state(), 0);

        lock.write_lock();
        lock.unlock();
        assert_eq!(lock.holder_state(), 0);
    }

    #[test]
    fn test_admission_predicates() {
        let mut state = LockState::new();
        let mut tickets = TicketCounter::new();

        assert!(state.can_write(None));
        assert!(state.can_read(None));

        // Queued reader blocks writers unless writers are preferred
        let reader = tickets.issue();
        state.read_queue.add(Notifiable::new(reader, Arc::new(Waker::new())));
        state.next_preferred = LockMode::Read;
        assert!(!state.can_write(None));
        state.next_preferred = LockMode::Write;
        assert!(state.can_write(None));

        // Queued writer blocks readers unless readers are preferred
        let writer = tickets.issue();
        state.write_queue.add(Notifiable::new(writer, Arc::new(Waker::new())));
        state.next_preferred = LockMode::Write;
        assert!(!state.can_read(None));
        assert!(!state.can_read(Some(reader)));
        state.read_grant = Some(reader);
        assert!(state.can_read(Some(reader)));
        assert!(!state.can_read(None));

        state.holder_state = WRITER_HOLDS;
        assert!(!state.can_read(Some(reader)));
        assert!(!state.can_write(Some(writer)));
    }

    #[test]
    fn test_queued_writer_must_be_head() {
        let mut state = LockState::new();
        let mut tickets = TicketCounter::new();
        let first = tickets.issue();
        let second = tickets.issue();
        state.write_queue.add(Notifiable::new(first, Arc::new(Waker::new())));
        state.write_queue.add(Notifiable::new(second, Arc::new(Waker::new())));

        assert!(state.can_write(Some(first)));
        assert!(!state.can_write(Some(second)));
    }

    #[test]
    fn test_broadcast_sets_batch_grant() {
        let mut state = LockState::new();
        let mut tickets = TicketCounter::new();
        let shared = Arc::new(Waker::new());
        let a = tickets.issue();
        let b = tickets.issue();
        state.read_queue.add(Notifiable::new(a, shared.clone()));
        state.read_queue.add(Notifiable::new(b, shared));

        assert!(state.broadcast_readers());
        assert_eq!(state.read_grant, Some(b));
    }

    #[test]
    fn test_zero_timeout_poll_leaves_no_entry() {
        let lock = FairReadWriteLock::new("test");
        lock.write_lock();
        assert!(!lock.try_write_lock_now());
        assert!(!lock.try_read_lock_now());
        assert_eq!(lock.waiting_writers(), 0);
        assert_eq!(lock.waiting_readers(), 0);
        assert_eq!(lock.stats().timeouts, 2);
        lock.unlock_write();
    }

    #[test]
    fn test_unbounded_recheck_interval_waits_to_deadline() {
        let config = LockConfig::default().with_recheck_interval(Duration::MAX);
        let lock = FairReadWriteLock::with_config("test", config);
        lock.write_lock();

        let mut unblocked = Vec::new();
        let start = Instant::now();
        let acquired = lock.try_read_lock_with(
            Duration::from_millis(20),
            Callbacks::new(|| true, |expired| unblocked.push(expired), || true),
        );

        assert!(!acquired);
        assert_eq!(unblocked, vec![true]);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(lock.waiting_readers(), 0);
        lock.unlock_write();
    }

    #[test]
    fn test_unbounded_recheck_interval_without_deadline() {
        let config = LockConfig::default().with_recheck_interval(Duration::MAX);
        let lock = Arc::new(FairReadWriteLock::with_config("test", config));
        lock.write_lock();

        let handle = {
            let lock = lock.clone();
            std::thread::spawn(move || {
                let acquired = lock.try_write_lock_with(Duration::MAX, NoopObserver);
                if acquired {
                    lock.unlock_write();
                }
                acquired
            })
        };

        while lock.waiting_writers() == 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
        lock.unlock_write();
        assert!(handle.join().unwrap());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_configured_poll_timeout() {
        let config = LockConfig::default().with_poll_timeout(Duration::from_millis(40));
        let lock = FairReadWriteLock::with_config("test", config);
        lock.write_lock();

        let start = Instant::now();
        assert!(!lock.try_read_lock_now());
        assert!(start.elapsed() >= Duration::from_millis(40));

        let start = Instant::now();
        assert!(!lock.try_write_lock_now());
        assert!(start.elapsed() >= Duration::from_millis(40));

        assert_eq!(lock.waiting_readers(), 0);
        assert_eq!(lock.waiting_writers(), 0);
        assert_eq!(lock.stats().timeouts, 2);
        lock.unlock_write();

        let start = Instant::now();
        assert!(lock.try_write_lock_now());
        assert!(start.elapsed() < Duration::from_millis(40));
        lock.unlock_write();
    }

    #[test]
    fn test_debug_output() {
        let lock = FairReadWriteLock::new("meta");
        let rendered = format!("{:?}", lock);
        assert!(rendered.contains("meta"));
        assert!(rendered.contains("holder_state: 0"));
    }

    #[test]
    #[should_panic(expected = "write unlock without matching acquisition")]
    fn test_unlock_write_unheld_panics() {
        FairReadWriteLock::new("test").unlock_write();
    }

    #[test]
    #[should_panic(expected = "read unlock without matching acquisition")]
    fn test_unlock_read_while_writer_holds_panics() {
        let lock = FairReadWriteLock::new("test");
        lock.write_lock();
        lock.unlock_read();
    }

    #[test]
    #[should_panic(expected = "unlock of an unheld lock")]
    fn test_generic_unlock_unheld_panics() {
        FairReadWriteLock::new("test").unlock();
    }
}
