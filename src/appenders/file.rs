//! Date-partitioned fallback file appender
//!
//! One file per component per UTC day, named `{YYYY-MM-DD}_{hash}.dat`
//! where `hash` is the first eight hex digits of the component name's MD5.
//! Every record is appended under an exclusive advisory lock, so several
//! processes may share the file.

use crate::core::{Appender, LogEntry, LoggerError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extension of fallback log files
pub const LOG_FILE_EXTENSION: &str = "dat";

pub struct DailyFileAppender {
    log_dir: PathBuf,
    file_hash: String,
}

impl DailyFileAppender {
    pub fn new(log_dir: impl Into<PathBuf>, component_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            file_hash: component_hash(component_name),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn file_name_for(&self, date: NaiveDate) -> String {
        format!(
            "{}_{}.{}",
            date.format("%Y-%m-%d"),
            self.file_hash,
            LOG_FILE_EXTENSION
        )
    }

    /// File receiving entries stamped at `timestamp`
    pub fn path_for(&self, timestamp: &DateTime<Utc>) -> PathBuf {
        self.log_dir.join(self.file_name_for(timestamp.date_naive()))
    }

    fn append_locked(path: &Path, record: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        FileExt::lock_exclusive(&file).map_err(|_| LoggerError::file_lock(path.display().to_string()))?;

        let written = file.write_all(record).and_then(|()| file.flush());
        let _ = FileExt::unlock(&file);

        written.map_err(|e| {
            LoggerError::io_operation(
                "writing log file",
                format!("Failed to append to '{}'", path.display()),
                e,
            )
        })
    }
}

impl Appender for DailyFileAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let path = self.path_for(&entry.timestamp);
        Self::append_locked(&path, entry.to_file_record().as_bytes())
    }

    fn name(&self) -> &str {
        "daily_file"
    }
}

/// First eight hex digits of the MD5 of `component_name`
pub fn component_hash(component_name: &str) -> String {
    let digest = format!("{:x}", md5::compute(component_name.as_bytes()));
    digest[..8].to_string()
}
