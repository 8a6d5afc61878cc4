//! Logger metrics for observability
//!
//! Counters describing where log calls ended up. Failures are swallowed by
//! the logger, so these counters are the only trace they leave.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use component_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_file_write();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.file_writes(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries appended to a fallback file
    file_writes: AtomicU64,

    /// Entries written to the process log
    process_log_writes: AtomicU64,

    /// Entries handed to the advanced backend
    backend_dispatches: AtomicU64,

    /// Calls rejected by the minimum level
    suppressed_by_level: AtomicU64,

    /// Calls claimed by the override hook
    overridden: AtomicU64,

    /// Calls dropped because logging is disabled
    suppressed_by_flag: AtomicU64,

    /// Failed directory, append, or process log writes
    write_failures: AtomicU64,

    /// Protection files that could not be written
    guard_failures: AtomicU64,

    /// Retention sweeps run
    sweeps: AtomicU64,

    /// Files deleted by retention sweeps
    files_swept: AtomicU64,
}

/// Point-in-time copy of [`LoggerMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub file_writes: u64,
    pub process_log_writes: u64,
    pub backend_dispatches: u64,
    pub suppressed_by_level: u64,
    pub overridden: u64,
    pub suppressed_by_flag: u64,
    pub write_failures: u64,
    pub guard_failures: u64,
    pub sweeps: u64,
    pub files_swept: u64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            file_writes: AtomicU64::new(0),
            process_log_writes: AtomicU64::new(0),
            backend_dispatches: AtomicU64::new(0),
            suppressed_by_level: AtomicU64::new(0),
            overridden: AtomicU64::new(0),
            suppressed_by_flag: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            guard_failures: AtomicU64::new(0),
            sweeps: AtomicU64::new(0),
            files_swept: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn file_writes(&self) -> u64 {
        self.file_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn process_log_writes(&self) -> u64 {
        self.process_log_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backend_dispatches(&self) -> u64 {
        self.backend_dispatches.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_by_level(&self) -> u64 {
        self.suppressed_by_level.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn overridden(&self) -> u64 {
        self.overridden.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed_by_flag(&self) -> u64 {
        self.suppressed_by_flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn guard_failures(&self) -> u64 {
        self.guard_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn files_swept(&self) -> u64 {
        self.files_swept.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_write(&self) {
        self.file_writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_process_log_write(&self) {
        self.process_log_writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_backend_dispatch(&self) {
        self.backend_dispatches.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_suppressed_by_level(&self) {
        self.suppressed_by_level.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_overridden(&self) {
        self.overridden.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_suppressed_by_flag(&self) {
        self.suppressed_by_flag.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed write, returning the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_guard_failure(&self) {
        self.guard_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_sweep(&self, files_deleted: u64) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.files_swept.fetch_add(files_deleted, Ordering::Relaxed);
    }

    /// Total calls that produced output somewhere
    pub fn total_written(&self) -> u64 {
        self.file_writes() + self.process_log_writes() + self.backend_dispatches()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            file_writes: self.file_writes(),
            process_log_writes: self.process_log_writes(),
            backend_dispatches: self.backend_dispatches(),
            suppressed_by_level: self.suppressed_by_level(),
            overridden: self.overridden(),
            suppressed_by_flag: self.suppressed_by_flag(),
            write_failures: self.write_failures(),
            guard_failures: self.guard_failures(),
            sweeps: self.sweeps(),
            files_swept: self.files_swept(),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.file_writes.store(0, Ordering::Relaxed);
        self.process_log_writes.store(0, Ordering::Relaxed);
        self.backend_dispatches.store(0, Ordering::Relaxed);
        self.suppressed_by_level.store(0, Ordering::Relaxed);
        self.overridden.store(0, Ordering::Relaxed);
        self.suppressed_by_flag.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.guard_failures.store(0, Ordering::Relaxed);
        self.sweeps.store(0, Ordering::Relaxed);
        self.files_swept.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
        assert_eq!(metrics.total_written(), 0);
    }

    #[test]
    fn test_write_failure_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_write_failure(), 0);
        assert_eq!(metrics.record_write_failure(), 1);
        assert_eq!(metrics.write_failures(), 2);
    }

    #[test]
    fn test_totals_and_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_file_write();
        metrics.record_process_log_write();
        metrics.record_backend_dispatch();
        metrics.record_sweep(3);
        metrics.record_sweep(0);
        metrics.record_guard_failure();

        assert_eq!(metrics.total_written(), 3);
        assert_eq!(metrics.sweeps(), 2);
        assert_eq!(metrics.files_swept(), 3);
        assert_eq!(metrics.guard_failures(), 1);

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }
}
