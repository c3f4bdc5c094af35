/*!
 * Core Module
 * Lock primitives, guards, limits and error handling
 */

pub mod errors;
pub mod guard;
pub mod limits;
pub mod sync;

// Re-export for convenience
pub use errors::*;
pub use guard::{Exclusive, LockGuard, ReadGuard, Shared, WriteGuard};
pub use sync::{FairReadWriteLock, LockConfig, LockMode};
