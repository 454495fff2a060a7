//! Pipeline statistics
//!
//! A single process-wide counter incremented by the sink stage and exposed
//! read-only to callers wanting metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the pipeline and its caller.
///
/// The sink is the only writer, but the counter is read concurrently, so it
/// is atomic.
#[derive(Debug, Default)]
pub struct Stats {
    events_printed: AtomicU64,
}

impl Stats {
    pub(crate) fn increment_printed(&self) {
        self.events_printed.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of events rendered so far.
    #[must_use]
    pub fn events_printed(&self) -> u64 {
        self.events_printed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero_and_increments() {
        let stats = Stats::default();
        assert_eq!(stats.events_printed(), 0);
        stats.increment_printed();
        stats.increment_printed();
        assert_eq!(stats.events_printed(), 2);
    }
}
