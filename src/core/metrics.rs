//! Emitter metrics for observability
//!
//! Counts what happened to each log call: delivered, suppressed by the kill
//! switch, or dropped on a serialization or delivery failure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery counters for an emitter
///
/// # Example
///
/// ```
/// use gelf_emitter::EmitterMetrics;
///
/// let metrics = EmitterMetrics::new();
///
/// metrics.record_sent();
/// metrics.record_delivery_failure();
///
/// assert_eq!(metrics.sent(), 1);
/// assert_eq!(metrics.dropped(), 1);
/// ```
#[derive(Debug)]
pub struct EmitterMetrics {
    /// Messages handed to the transport without error
    sent: AtomicU64,

    /// Messages skipped because the kill switch was engaged
    suppressed: AtomicU64,

    /// Messages dropped because they could not be encoded
    serialization_failures: AtomicU64,

    /// Messages dropped because the transport failed
    delivery_failures: AtomicU64,
}

impl EmitterMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            sent: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            serialization_failures: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn serialization_failures(&self) -> u64 {
        self.serialization_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivery_failures(&self) -> u64 {
        self.delivery_failures.load(Ordering::Relaxed)
    }

    /// Messages lost to either failure kind
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.serialization_failures() + self.delivery_failures()
    }

    /// Record a delivered message
    #[inline]
    pub fn record_sent(&self) -> u64 {
        self.sent.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a message skipped by the kill switch
    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a message that failed to serialize
    #[inline]
    pub fn record_serialization_failure(&self) -> u64 {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a message the transport failed to deliver
    #[inline]
    pub fn record_delivery_failure(&self) -> u64 {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Suppressed messages are not attempts and do not count.
    /// Returns 0.0 if nothing has been attempted.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped() as f64;
        let total = self.sent() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.sent.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.serialization_failures.store(0, Ordering::Relaxed);
        self.delivery_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for EmitterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EmitterMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            sent: AtomicU64::new(self.sent()),
            suppressed: AtomicU64::new(self.suppressed()),
            serialization_failures: AtomicU64::new(self.serialization_failures()),
            delivery_failures: AtomicU64::new(self.delivery_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = EmitterMetrics::new();
        assert_eq!(metrics.sent(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.serialization_failures(), 0);
        assert_eq!(metrics.delivery_failures(), 0);
        assert_eq!(metrics.dropped(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = EmitterMetrics::new();
        assert_eq!(metrics.record_sent(), 0);
        assert_eq!(metrics.record_sent(), 1);
        assert_eq!(metrics.sent(), 2);
    }

    #[test]
    fn test_dropped_combines_failures() {
        let metrics = EmitterMetrics::new();
        metrics.record_serialization_failure();
        metrics.record_delivery_failure();
        metrics.record_delivery_failure();
        metrics.record_suppressed();

        assert_eq!(metrics.dropped(), 3);
        assert_eq!(metrics.suppressed(), 1);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = EmitterMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_sent();
        }
        metrics.record_delivery_failure();
        metrics.record_suppressed();

        assert_eq!(metrics.drop_rate(), 25.0);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = EmitterMetrics::new();
        metrics.record_sent();
        metrics.record_suppressed();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.sent(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(snapshot.sent(), 1);
        assert_eq!(snapshot.suppressed(), 1);
    }
}
