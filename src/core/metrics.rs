//! Logger metrics for observability
//!
//! Counters for the producer and consumer sides of the queue. Producers
//! bump `enqueued`/`skipped_empty`; the consumer bumps everything else.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use threaded_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_enqueued();
/// metrics.record_written();
///
/// assert_eq!(metrics.enqueued(), 2);
/// assert_eq!(metrics.pending(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries accepted into the queue
    enqueued: AtomicU64,

    /// Entries written to the sink
    written: AtomicU64,

    /// Entries discarded after the sink failed
    dropped: AtomicU64,

    /// Empty messages ignored by `log`
    skipped_empty: AtomicU64,

    /// Non-empty batches handed to the sink
    batches: AtomicU64,

    /// Times the consumer came back from waiting on the queue
    wakeups: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            skipped_empty: AtomicU64::new(0),
            batches: AtomicU64::new(0),
            wakeups: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped_empty(&self) -> u64 {
        self.skipped_empty.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn wakeups(&self) -> u64 {
        self.wakeups.load(Ordering::Relaxed)
    }

    /// Entries accepted but not yet written or dropped
    pub fn pending(&self) -> u64 {
        self.enqueued()
            .saturating_sub(self.written())
            .saturating_sub(self.dropped_count())
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped_empty(&self) -> u64 {
        self.skipped_empty.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_batch(&self) -> u64 {
        self.batches.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_wakeup(&self) -> u64 {
        self.wakeups.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written or dropped yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.written.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.skipped_empty.store(0, Ordering::Relaxed);
        self.batches.store(0, Ordering::Relaxed);
        self.wakeups.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            written: AtomicU64::new(self.written()),
            dropped: AtomicU64::new(self.dropped_count()),
            skipped_empty: AtomicU64::new(self.skipped_empty()),
            batches: AtomicU64::new(self.batches()),
            wakeups: AtomicU64::new(self.wakeups()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.wakeups(), 0);
        assert_eq!(metrics.pending(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_enqueued(), 0);
        assert_eq!(metrics.record_enqueued(), 1);
        assert_eq!(metrics.enqueued(), 2);
    }

    #[test]
    fn test_pending_and_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..10 {
            metrics.record_enqueued();
        }
        for _ in 0..6 {
            metrics.record_written();
        }
        for _ in 0..2 {
            metrics.record_dropped();
        }

        assert_eq!(metrics.pending(), 2);
        let rate = metrics.drop_rate();
        assert!(rate > 24.9 && rate < 25.1, "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();

        let snapshot = metrics.clone();
        metrics.record_written();

        assert_eq!(snapshot.written(), 1);
        assert_eq!(metrics.written(), 2);

        metrics.reset();
        assert_eq!(metrics.written(), 0);
        assert_eq!(snapshot.written(), 1);
    }
}
