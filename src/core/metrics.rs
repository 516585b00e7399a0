//! Logger metrics for observability
//!
//! Counters for the dispatch path: how many records were accepted, how many
//! sink deliveries succeeded, failed, or were filtered out by level.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use log11::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.delivered_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the dispatcher
    records: AtomicU64,

    /// Successful writes of a record to one sink
    delivered: AtomicU64,

    /// Sink writes that returned an error or panicked
    failed: AtomicU64,

    /// Sink deliveries skipped by the level filter
    filtered: AtomicU64,

    /// Completed sink set rebuilds
    rebuilds: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            rebuilds: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_count(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_record(&self) -> u64 {
        self.records.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rebuild(&self) -> u64 {
        self.rebuilds.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate of attempted deliveries as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been delivered or attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count();
        let attempted = self.delivered_count() + failed;

        if attempted == 0 {
            return 0.0;
        }

        (failed as f64 / attempted as f64) * 100.0
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.records.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.rebuilds.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
