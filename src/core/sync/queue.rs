/*!
 * Notify Queue
 *
 * FIFO admission bookkeeping for one request class.
 *
 * # Design: Ticket-Indexed Slot Table Over Linked Nodes
 *
 * Each blocked caller registers a `Notifiable` under a ticket issued from a
 * monotonically increasing per-lock counter. Entries live in a `BTreeMap`
 * keyed by ticket, so:
 * - Arrival order is key order (head = smallest ticket)
 * - Removal from any position is by id, with no node links to repair
 * - A departed waiter leaves nothing behind that a later notify could reach
 *
 * The queue is only touched while the owning lock's internal mutex is held.
 */

use super::types::Ticket;
use super::waker::Waker;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// One blocked acquisition attempt: a ticket paired with the handle it sleeps on
#[derive(Debug, Clone)]
pub struct Notifiable {
    ticket: Ticket,
    waker: Arc<Waker>,
}

impl Notifiable {
    pub fn new(ticket: Ticket, waker: Arc<Waker>) -> Self {
        Self { ticket, waker }
    }

    #[inline]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

}

/// FIFO of blocked callers of one class
#[derive(Debug, Default)]
pub struct NotifyQueue {
    slots: BTreeMap<Ticket, Arc<Waker>>,
}

impl NotifyQueue {
    pub const fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Append at the tail
    ///
    /// Tickets come from a monotonic counter, so a new ticket always sorts last.
    pub fn add(&mut self, node: Notifiable) {
        debug_assert!(
            self.slots
                .last_key_value()
                .map_or(true, |(tail, _)| *tail < node.ticket),
            "ticket {} enqueued out of order",
            node.ticket
        );
        self.slots.insert(node.ticket, node.waker);
    }

    /// Unlink the entry for `ticket` wherever it sits
    ///
    /// Returns `false` if the ticket was not queued.
    pub fn remove(&mut self, ticket: Ticket) -> bool {
        self.slots.remove(&ticket).is_some()
    }

    /// Wake the head entry's waker
    ///
    /// Returns whether anything was waiting.
    pub fn notify_one(&self) -> bool {
        match self.slots.iter().next() {
            Some((ticket, waker)) => {
                let sleeping = waker.wake_all();
                trace!(%ticket, sleeping, "notified queue head");
                true
            }
            None => false,
        }
    }

    /// Wake every distinct waker in the queue
    ///
    /// Entries sharing one waker receive a single broadcast. Returns whether
    /// anything was waiting.
    pub fn notify_all(&self) -> bool {
        let mut woken: Vec<*const Waker> = Vec::new();
        let mut sleeping = 0;
        for waker in self.slots.values() {
            let ptr = Arc::as_ptr(waker);
            if !woken.contains(&ptr) {
                sleeping += waker.wake_all();
                woken.push(ptr);
            }
        }
        if !woken.is_empty() {
            trace!(queued = self.slots.len(), sleeping, "notified queue");
        }
        !woken.is_empty()
    }

    /// Ticket at the head of the queue
    #[inline]
    pub fn head(&self) -> Option<Ticket> {
        self.slots.keys().next().copied()
    }

    /// Ticket at the tail of the queue
    #[inline]
    pub fn tail(&self) -> Option<Ticket> {
        self.slots.keys().next_back().copied()
    }

    #[inline]
    pub fn contains(&self, ticket: Ticket) -> bool {
        self.slots.contains_key(&ticket)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Queued tickets in arrival order
    pub fn tickets(&self) -> impl Iterator<Item = Ticket> + '_ {
        self.slots.keys().copied()
    }
}
