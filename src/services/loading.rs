//! Global loading indicator.
//!
//! Every API call holds a [`LoadingGuard`] for its duration. The indicator is
//! on while at least one guard is alive, so overlapping calls do not switch
//! it off early.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts in-flight calls.
#[derive(Debug, Default, Clone)]
pub struct LoadingState {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingState {
    /// Creates an idle indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one call as started until the returned guard is dropped.
    #[must_use = "the call is only counted while the guard is alive"]
    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Returns true while any call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    /// Number of calls in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Keeps one call counted while alive.
#[derive(Debug)]
pub struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // `fetch_update` never underflows; a failed update means the count
        // was already zero.
        let _previous = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            });
    }
}
