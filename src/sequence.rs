//! Guards against slow responses overwriting newer ones.
//!
//! A client that refetches whenever a parameter changes (e.g. the selected
//! month) issues a ticket per request and only applies a response whose ticket
//! is still the latest one issued.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues request tickets in increasing order.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

/// Identifies one request issued by a [RequestSequence].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestSequence {
    /// Issue a ticket for a new request, superseding every earlier ticket.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued ticket.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `response` in `target` if `ticket` is still the latest.
    ///
    /// Returns whether `target` was updated.
    pub fn apply<T>(&self, ticket: RequestTicket, response: T, target: &mut T) -> bool {
        if !self.is_latest(ticket) {
            tracing::debug!("Discarding stale response for {ticket:?}");
            return false;
        }

        *target = response;
        true
    }
}
