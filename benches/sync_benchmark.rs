/*!
 * Fair Lock Benchmarks
 *
 * Compare the fair reader-writer lock against parking_lot's RwLock
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fair_rwlock::core::sync::{FairReadWriteLock, LockConfig, Notifiable, NotifyQueue, Ticket, Waker};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended");

    let fair = FairReadWriteLock::new("bench");
    group.bench_function("fair_read", |b| {
        b.iter(|| {
            fair.read_lock();
            fair.unlock_read();
        });
    });
    group.bench_function("fair_write", |b| {
        b.iter(|| {
            fair.write_lock();
            fair.unlock_write();
        });
    });
    group.bench_function("fair_try_write_now", |b| {
        b.iter(|| {
            if black_box(fair.try_write_lock_now()) {
                fair.unlock_write();
            }
        });
    });

    let baseline = RwLock::new(0u64);
    group.bench_function("parking_lot_read", |b| {
        b.iter(|| black_box(*baseline.read()));
    });
    group.bench_function("parking_lot_write", |b| {
        b.iter(|| *baseline.write() += 1);
    });

    group.finish();
}

fn bench_guards(c: &mut Criterion) {
    let lock = FairReadWriteLock::new("bench");

    c.bench_function("guard_read_write_pair", |b| {
        b.iter(|| {
            drop(lock.read());
            drop(lock.write());
        });
    });
}

/// Run `ops` acquisitions on the calling thread while `background`
/// threads keep the lock busy in the opposite mode.
fn run_mixed(lock: &Arc<FairReadWriteLock>, background: usize, ops: usize) {
    let stop = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..background)
        .map(|_| {
            let (lock, stop) = (lock.clone(), stop.clone());
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    lock.read_lock();
                    thread::yield_now();
                    lock.unlock_read();
                }
            })
        })
        .collect();

    for _ in 0..ops {
        lock.write_lock();
        lock.unlock_write();
    }

    stop.store(true, Ordering::Relaxed);
    for handle in handles {
        handle.join().unwrap();
    }
}

fn bench_writer_among_readers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer_among_readers");
    group.measurement_time(Duration::from_secs(5));

    for readers in [1, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(readers),
            &readers,
            |b, &readers| {
                let lock = Arc::new(FairReadWriteLock::with_config(
                    "bench",
                    LockConfig::responsive(),
                ));
                b.iter(|| run_mixed(&lock, readers, 100));
            },
        );
    }

    group.finish();
}

fn bench_notify_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify_queue");

    for depth in [1u64, 16, 256] {
        group.bench_with_input(BenchmarkId::new("fill_drain", depth), &depth, |b, &depth| {
            let waker = Arc::new(Waker::new());
            b.iter(|| {
                let mut queue = NotifyQueue::new();
                for raw in 0..depth {
                    queue.add(Notifiable::new(Ticket::new(raw), waker.clone()));
                }
                while let Some(head) = queue.head() {
                    queue.remove(head);
                }
                black_box(queue.is_empty())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_uncontended,
    bench_guards,
    bench_writer_among_readers,
    bench_notify_queue
);

criterion_main!(benches);
