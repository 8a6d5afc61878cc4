//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// An output a rendered entry can be written to.
///
/// Appenders write through immediately; there is no buffering to flush
/// unless the destination itself buffers.
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
