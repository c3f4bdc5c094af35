/*!
 * Fair Lock Stress Driver
 *
 * Runs reader and writer threads against one lock and checks that:
 * - No reader overlaps a writer and no two writers overlap
 * - Both classes keep making progress under sustained contention
 *
 * Prints the lock statistics as JSON when done.
 */

use fair_rwlock::monitoring::span_hold;
use fair_rwlock::{init_tracing, Callbacks, FairReadWriteLock, LockConfig, LockMode, LockStatsSnapshot};
use serde::Serialize;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Serialize)]
struct StressConfig {
    readers: usize,
    writers: usize,
    millis: u64,
    hold_micros: u64,
}

impl StressConfig {
    /// Read STRESS_READERS, STRESS_WRITERS, STRESS_MILLIS, STRESS_HOLD_MICROS
    fn from_env() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            readers: env_or("STRESS_READERS", 8)?,
            writers: env_or("STRESS_WRITERS", 2)?,
            millis: env_or("STRESS_MILLIS", 1000)?,
            hold_micros: env_or("STRESS_HOLD_MICROS", 50)?,
        })
    }

    fn hold(&self) -> Duration {
        Duration::from_micros(self.hold_micros)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("invalid {}={:?}: {}", key, raw, e).into()),
        Err(_) => Ok(default),
    }
}

/// Occupancy tracked outside the lock: -1 writer, N readers
#[derive(Default)]
struct Occupancy {
    holders: AtomicI64,
    violations: AtomicU64,
}

impl Occupancy {
    fn enter_write(&self) {
        if self
            .holders
            .compare_exchange(0, -1, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn leave_write(&self) {
        self.holders.store(0, Ordering::Release);
    }

    fn enter_read(&self) {
        if self.holders.fetch_add(1, Ordering::AcqRel) < 0 {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn leave_read(&self) {
        self.holders.fetch_sub(1, Ordering::AcqRel);
    }
}

#[derive(Debug, Serialize)]
struct StressReport {
    config: StressConfig,
    elapsed_ms: u64,
    violations: u64,
    abandoned_writes: u64,
    stats: LockStatsSnapshot,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = StressConfig::from_env()?;
    info!(?config, "Fair lock stress run starting");

    let lock = Arc::new(FairReadWriteLock::with_config(
        "stress",
        LockConfig::responsive(),
    ));
    let occupancy = Arc::new(Occupancy::default());
    let stop = Arc::new(AtomicBool::new(false));
    let abandoned_writes = Arc::new(AtomicU64::new(0));
    let started = Instant::now();

    let mut handles = Vec::with_capacity(config.readers + config.writers);

    for i in 0..config.readers {
        let (lock, occupancy, stop) = (lock.clone(), occupancy.clone(), stop.clone());
        let hold = config.hold();
        handles.push(
            thread::Builder::new()
                .name(format!("reader-{}", i))
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        let _guard = lock.read();
                        let _span = span_hold(lock.name(), LockMode::Read);
                        occupancy.enter_read();
                        thread::sleep(hold);
                        occupancy.leave_read();
                    }
                })?,
        );
    }

    for i in 0..config.writers {
        let (lock, occupancy, stop) = (lock.clone(), occupancy.clone(), stop.clone());
        let abandoned_writes = abandoned_writes.clone();
        let hold = config.hold();
        handles.push(
            thread::Builder::new()
                .name(format!("writer-{}", i))
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        // Alternate plain blocking writes with cancellable ones
                        let observer = Callbacks::new(
                            || true,
                            |_expired| {},
                            || !stop.load(Ordering::Relaxed),
                        );
                        match lock.try_write_with(Duration::from_secs(5), observer) {
                            Ok(_guard) => {
                                let _span = span_hold(lock.name(), LockMode::Write);
                                occupancy.enter_write();
                                thread::sleep(hold);
                                occupancy.leave_write();
                            }
                            Err(_) => {
                                abandoned_writes.fetch_add(1, Ordering::Relaxed);
                            }
                        }

                        let _guard = lock.write();
                        occupancy.enter_write();
                        thread::sleep(hold);
                        occupancy.leave_write();
                    }
                })?,
        );
    }

    thread::sleep(Duration::from_millis(config.millis));
    stop.store(true, Ordering::Relaxed);

    for handle in handles {
        if handle.join().is_err() {
            error!("Stress worker panicked");
            return Err("stress worker panicked".into());
        }
    }

    let report = StressReport {
        config,
        elapsed_ms: started.elapsed().as_millis() as u64,
        violations: occupancy.violations.load(Ordering::Relaxed),
        abandoned_writes: abandoned_writes.load(Ordering::Relaxed),
        stats: lock.stats(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.violations > 0 {
        error!(violations = report.violations, "Mutual exclusion violated");
        return Err(format!("{} mutual exclusion violations", report.violations).into());
    }

    info!(
        reads = report.stats.read_acquisitions,
        writes = report.stats.write_acquisitions,
        contention = report.stats.contention_ratio(),
        "Stress run complete"
    );
    Ok(())
}
