/*!
 * Lock-Free Lock Statistics
 * Atomic counters updated on acquisition paths, readable without the lock
 */

use super::types::LockMode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic lock statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the lock's mutex
/// - All operations use relaxed ordering; snapshots are approximate
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct LockStats {
    read_acquisitions: AtomicU64,
    write_acquisitions: AtomicU64,
    contended: AtomicU64,
    timeouts: AtomicU64,
    abandoned: AtomicU64,
    releases: AtomicU64,
}

impl LockStats {
    pub const fn new() -> Self {
        Self {
            read_acquisitions: AtomicU64::new(0),
            write_acquisitions: AtomicU64::new(0),
            contended: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            abandoned: AtomicU64::new(0),
            releases: AtomicU64::new(0),
        }
    }

    /// Record a successful acquisition
    #[inline(always)]
    pub(crate) fn record_acquire(&self, mode: LockMode, contended: bool) {
        match mode {
            LockMode::Read => self.read_acquisitions.fetch_add(1, Ordering::Relaxed),
            LockMode::Write => self.write_acquisitions.fetch_add(1, Ordering::Relaxed),
        };
        if contended {
            self.contended.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub(crate) fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_abandoned(&self) {
        self.abandoned.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only snapshot (no synchronization with the lock)
    pub fn snapshot(&self) -> LockStatsSnapshot {
        LockStatsSnapshot {
            read_acquisitions: self.read_acquisitions.load(Ordering::Relaxed),
            write_acquisitions: self.write_acquisitions.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `LockStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatsSnapshot {
    pub read_acquisitions: u64,
    pub write_acquisitions: u64,
    /// Acquisitions that had to queue before succeeding
    pub contended: u64,
    pub timeouts: u64,
    /// Attempts given up by an observer
    pub abandoned: u64,
    pub releases: u64,
}

impl LockStatsSnapshot {
    #[inline]
    pub fn acquisitions(&self) -> u64 {
        self.read_acquisitions + self.write_acquisitions
    }

    /// Fraction of acquisitions that had to wait
    pub fn contention_ratio(&self) -> f64 {
        match self.acquisitions() {
            0 => 0.0,
            n => self.contended as f64 / n as f64,
        }
    }
}
