//! Trailing-edge debouncer driven by caller-supplied instants.

use std::time::{Duration, Instant};

pub const AUTOCOMPLETE_DELAY: Duration = Duration::from_millis(300);

/// Holds at most one pending value; scheduling again resets the timer.
#[derive(Debug, Clone)]
pub struct Debouncer<T = String> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the delay from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Takes the pending value once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(deadline, _)| *deadline <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

impl Default for Debouncer<String> {
    fn default() -> Self {
        Self::new(AUTOCOMPLETE_DELAY)
    }
}
