/*!
 * Fair Reader-Writer Lock Library
 *
 * Synchronization primitive guarding shared document-store state across
 * concurrent request-handling threads: FIFO admission within each class,
 * alternating reader/writer phases, bounded and cooperatively cancellable
 * acquisition.
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{LockError, LockResult};
pub use crate::core::guard::{ReadGuard, WriteGuard};
pub use crate::core::sync::{
    BlockObserver, Callbacks, FairReadWriteLock, LockConfig, LockMode, LockStatsSnapshot,
};
pub use monitoring::init_tracing;
