/*!
 * Lock Guard Integration Tests
 *
 * RAII acquisition and release through typed guards
 */

use fair_rwlock::core::guard::{ReadGuard, WriteGuard};
use fair_rwlock::core::sync::{Callbacks, FairReadWriteLock, LockMode};
use fair_rwlock::LockError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_guards_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<FairReadWriteLock>();
    assert_send_sync::<ReadGuard<'static>>();
    assert_send_sync::<WriteGuard<'static>>();
}

#[test]
fn test_read_guards_share() {
    let lock = FairReadWriteLock::new("guards");
    let a = lock.read();
    let b = lock.read();
    assert_eq!(lock.holder_state(), 2);

    drop(a);
    assert_eq!(lock.holder_state(), 1);
    b.unlock();
    assert!(!lock.is_locked());
}

#[test]
fn test_write_guard_excludes_readers() {
    let lock = FairReadWriteLock::new("guards");
    let guard = lock.write();

    let err = lock.try_read_for(Duration::from_millis(10)).unwrap_err();
    assert_eq!(err.mode(), Some(LockMode::Read));
    assert!(err.is_recoverable());

    drop(guard);
    let read = lock.try_read_for(Duration::from_millis(10)).unwrap();
    assert_eq!(read.lock().name(), "guards");
}

#[test]
fn test_try_write_for_timeout_reports_wait() {
    let lock = FairReadWriteLock::new("guards");
    let _read = lock.read();

    match lock.try_write_for(Duration::from_millis(30)) {
        Err(LockError::Timeout { mode, waited_ms }) => {
            assert_eq!(mode, LockMode::Write);
            assert!(waited_ms >= 30);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(lock.waiting_writers(), 0);
}

#[test]
fn test_observer_abandon_maps_to_error() {
    let lock = FairReadWriteLock::new("guards");
    let _write = lock.write();

    let result = lock.try_write_with(
        Duration::from_secs(5),
        Callbacks::new(|| false, |_expired| {}, || true),
    );
    assert_eq!(
        result.unwrap_err(),
        LockError::Abandoned {
            mode: LockMode::Write
        }
    );
}

#[test]
fn test_guard_released_on_panic() {
    let lock = Arc::new(FairReadWriteLock::new("guards"));

    let worker = {
        let lock = lock.clone();
        thread::spawn(move || {
            let _guard = lock.write();
            panic!("worker failed while holding the lock");
        })
    };
    assert!(worker.join().is_err());

    assert!(!lock.is_locked());
    let _guard = lock.try_write_for(Duration::from_millis(10)).unwrap();
}

#[test]
fn test_guards_from_worker_threads() {
    let lock = Arc::new(FairReadWriteLock::new("guards"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = lock.clone();
            thread::spawn(move || {
                let observer = Callbacks::new(|| true, |_expired| {}, || true);
                let guard = lock.try_read_with(Duration::from_secs(1), observer);
                assert!(guard.is_ok());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(!lock.is_locked());
    assert_eq!(lock.stats().read_acquisitions, 4);
}
