//! Deferred presentation actions.
//!
//! Timed effects (showing the modal, clearing the board after it closes)
//! are queued here and fired from the render loop's tick. They never run
//! inside the engine.

use std::time::Instant;

/// Queue of actions waiting for their due time.
#[derive(Debug, Clone)]
pub struct Schedule<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Schedule<T> {
    /// Empty schedule.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queues `action` to fire at `at`.
    pub fn push(&mut self, at: Instant, action: T) {
        self.pending.push((at, action));
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let mut fired: Vec<(Instant, T)> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                fired.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|(at, _)| *at);
        fired.into_iter().map(|(_, action)| action).collect()
    }

    /// Drops every pending action.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self::new()
    }
}
