//! Advisory busy indicator.
//!
//! Counts requests in flight and publishes busy/idle transitions. It never
//! prevents a new request from being issued.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// Tracks in-flight backend requests.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    in_flight: Arc<AtomicUsize>,
    busy: Arc<watch::Sender<bool>>,
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            busy: Arc::new(busy),
        }
    }

    /// Receive `true` while at least one request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Mark a request as started; it ends when the guard drops.
    pub fn begin(&self) -> ActivityGuard {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.busy.send_replace(true);
        }
        ActivityGuard {
            tracker: self.clone(),
        }
    }
}

/// Ends one tracked request on drop.
#[derive(Debug)]
pub struct ActivityGuard {
    tracker: ActivityTracker,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        if self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracker.busy.send_replace(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_until_last_guard_drops() {
        let tracker = ActivityTracker::new();
        let busy = tracker.subscribe();
        assert!(!*busy.borrow());

        let first = tracker.begin();
        let second = tracker.begin();
        assert!(*busy.borrow());
        assert_eq!(tracker.in_flight(), 2);

        drop(first);
        assert!(*busy.borrow());
        drop(second);
        assert!(!*busy.borrow());
        assert_eq!(tracker.in_flight(), 0);
    }
}
