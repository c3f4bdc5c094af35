/*!
 * Lock Types
 *
 * Request classes and waiter tickets shared by the queue and the lock.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request class of an acquisition, also used as the lock's preferred phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Shared access
    Read,
    /// Exclusive access
    Write,
}

impl LockMode {
    /// The competing class
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Read => Self::Write,
            Self::Write => Self::Read,
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one blocked acquisition attempt
///
/// Tickets are issued from a per-lock monotonically increasing counter, so
/// ordering tickets orders arrivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic ticket source
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub(crate) const fn new() -> Self {
        Self { next: 0 }
    }

    pub(crate) fn issue(&mut self) -> Ticket {
        let ticket = Ticket(self.next);
        self.next += 1;
        ticket
    }
}
