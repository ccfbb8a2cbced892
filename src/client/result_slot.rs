//! Request-keyed result state for a calculator view.
//!
//! A user can click "Calculate" again before the previous response arrives,
//! and responses may come back in any order. The slot hands out a ticket per
//! submission and only accepts the completion carrying the newest ticket, so a
//! late response can never overwrite a newer one.

use std::sync::{Mutex, PoisonError};

/// Identifies one submission. Only the most recent ticket can complete the slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission exists; the response was dropped.
    Stale,
}

#[derive(Debug)]
struct SlotState<T> {
    latest: u64,
    loading: bool,
    current: Option<T>,
}

#[derive(Debug)]
pub struct ResultSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                latest: 0,
                loading: false,
                current: None,
            }),
        }
    }

    /// Starts a submission. The displayed result is cleared so nothing stale
    /// is shown while the new one is in flight.
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.latest += 1;
        state.loading = true;
        state.current = None;
        Ticket(state.latest)
    }

    /// Records the outcome of a submission.
    ///
    /// A failure leaves the slot empty. Either way the outcome is ignored
    /// unless `ticket` is the most recent one issued.
    pub fn complete<E>(&self, ticket: Ticket, outcome: Result<T, E>) -> Completion {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 != state.latest {
            tracing::debug!(ticket = ticket.0, latest = state.latest, "Discarding stale result");
            return Completion::Stale;
        }

        state.loading = false;
        state.current = outcome.ok();
        Completion::Applied
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).loading
    }

    /// The result currently on display, if any.
    pub fn current(&self) -> Option<T>
    where
        T: Clone,
    {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }
}
