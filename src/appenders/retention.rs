//! Retention sweeps over the fallback log directory
//!
//! Only files with the log extension are considered; guard files and
//! anything else a user drops in the directory are left alone.

use super::file::LOG_FILE_EXTENSION;
use crate::core::{LoggerError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

const SECONDS_PER_DAY: u64 = 86_400;

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Log files inspected
    pub scanned: u64,
    pub deleted: u64,
    /// Expired files that could not be removed
    pub failed: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RetentionSweeper;

impl RetentionSweeper {
    pub fn new() -> Self {
        Self
    }

    /// Delete log files last modified more than `retention_days` ago
    pub fn sweep(&self, log_dir: &Path, retention_days: u32) -> Result<SweepReport> {
        self.sweep_at(log_dir, retention_days, SystemTime::now())
    }

    /// Same as [`sweep`](Self::sweep) with `now` supplied by the caller
    pub fn sweep_at(
        &self,
        log_dir: &Path,
        retention_days: u32,
        now: SystemTime,
    ) -> Result<SweepReport> {
        let mut report = SweepReport::default();
        if !log_dir.is_dir() {
            return Ok(report);
        }

        let max_age = Duration::from_secs(u64::from(retention_days) * SECONDS_PER_DAY);
        let Some(cutoff) = now.checked_sub(max_age) else {
            return Ok(report);
        };

        let entries = fs::read_dir(log_dir).map_err(|e| {
            LoggerError::io_operation(
                "reading log directory",
                format!("Failed to list '{}'", log_dir.display()),
                e,
            )
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let is_log = path
                .extension()
                .map_or(false, |ext| ext == LOG_FILE_EXTENSION);
            if !is_log || !path.is_file() {
                continue;
            }
            report.scanned += 1;

            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(_) => {
                    report.failed += 1;
                    continue;
                }
            };

            if modified < cutoff {
                match fs::remove_file(&path) {
                    Ok(()) => report.deleted += 1,
                    Err(_) => report.failed += 1,
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn days(n: u64) -> Duration {
        Duration::from_secs(n * SECONDS_PER_DAY)
    }

    #[test]
    fn test_missing_directory_is_noop() {
        let dir = tempdir().unwrap();
        let report = RetentionSweeper::new()
            .sweep(&dir.path().join("absent"), 30)
            .unwrap();
        assert_eq!(report, SweepReport::default());
    }

    #[test]
    fn test_retention_boundary() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("2025-01-01_abcdef12.dat");
        fs::write(&log, "x").unwrap();
        let sweeper = RetentionSweeper::new();
        let now = SystemTime::now();

        // one day short of the retention window
        let report = sweeper.sweep_at(dir.path(), 7, now + days(6)).unwrap();
        assert_eq!(report.scanned, 1);
        assert_eq!(report.deleted, 0);
        assert!(log.exists());

        // one day past it
        let report = sweeper.sweep_at(dir.path(), 7, now + days(8)).unwrap();
        assert_eq!(report.deleted, 1);
        assert!(!log.exists());
    }

    #[test]
    fn test_only_log_files_are_swept() {
        let dir = tempdir().unwrap();
        for name in ["a.dat", "b.dat", "README.md", ".htaccess", "index.html", "notes.txt", "debug.log"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let report = RetentionSweeper::new()
            .sweep_at(dir.path(), 1, SystemTime::now() + days(30))
            .unwrap();

        assert_eq!(report.scanned, 2);
        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed, 0);
        assert!(dir.path().join("README.md").exists());
        assert!(dir.path().join(".htaccess").exists());
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("debug.log").exists());
    }

    #[test]
    fn test_fresh_files_kept() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("today.dat"), "x").unwrap();

        let report = RetentionSweeper::new().sweep(dir.path(), 30).unwrap();
        assert_eq!(report.scanned, 1);
        assert_eq!(report.deleted, 0);
    }
}
