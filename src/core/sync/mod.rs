/*!
 * Synchronization Primitives
 *
 * The fair reader-writer lock and the building blocks it is made of:
 * - `Waker`: condvar-based wakeup handle used under the lock's internal mutex
 * - `NotifyQueue`: ticket-indexed FIFO of blocked callers per request class
 * - `FairReadWriteLock`: admission policy, phase alternation, release
 *
 * # Use Cases
 *
 * - **Collection metadata**: many concurrent readers, rare exclusive updates
 * - **Storage-engine selection**: read on every request, written on reconfigure
 * - **Cluster bookkeeping**: bounded waits with external cancellation checks
 */

mod config;
mod fair_rwlock;
mod queue;
mod stats;
mod traits;
mod types;
mod waker;

pub use config::LockConfig;
pub use fair_rwlock::FairReadWriteLock;
pub use queue::{Notifiable, NotifyQueue};
pub use stats::{LockStats, LockStatsSnapshot};
pub use traits::{BlockObserver, Callbacks, NoopObserver};
pub use types::{LockMode, Ticket};
pub use waker::Waker;

pub(crate) use fair_rwlock::Acquire;
