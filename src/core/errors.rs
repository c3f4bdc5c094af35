/*!
 * Error Types
 * Lock error handling with thiserror, miette, and serde support
 */

use crate::core::sync::LockMode;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for guard-returning lock operations
pub type LockResult<T> = Result<T, LockError>;

/// Lock acquisition and release errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LockError {
    #[error("{mode} lock not acquired within {waited_ms}ms")]
    #[diagnostic(
        code(lock::timeout),
        help("The lock stayed contended for the whole timeout. Retry or raise the timeout.")
    )]
    Timeout { mode: LockMode, waited_ms: u64 },

    #[error("{mode} lock acquisition abandoned by observer")]
    #[diagnostic(
        code(lock::abandoned),
        help("The blocking observer declined to wait or cancelled during a re-check.")
    )]
    Abandoned { mode: LockMode },

    #[error("{mode} unlock without matching acquisition (holder state {holder_state})")]
    #[diagnostic(
        code(lock::not_held),
        help("Every unlock must pair with exactly one successful acquisition of the same mode.")
    )]
    NotHeld { mode: LockMode, holder_state: i64 },

    #[error("unlock of an unheld lock")]
    #[diagnostic(
        code(lock::not_locked),
        help("The generic unlock infers the mode from the holder state, which was zero.")
    )]
    NotLocked,
}

impl LockError {
    /// Mode of the acquisition or release that failed, if known
    pub fn mode(&self) -> Option<LockMode> {
        match self {
            Self::Timeout { mode, .. } | Self::Abandoned { mode } | Self::NotHeld { mode, .. } => {
                Some(*mode)
            }
            Self::NotLocked => None,
        }
    }

    /// Whether this error is an ordinary, recoverable acquisition failure
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NotHeld { .. } | Self::NotLocked)
    }
}
