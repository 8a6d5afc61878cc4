//! Process log appender
//!
//! Writes single-line entries to the process's diagnostic stream, stderr
//! unless another writer is supplied.

use crate::core::{Appender, LogEntry, Result};
use parking_lot::Mutex;
use std::io::Write;

pub struct ProcessLogAppender {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ProcessLogAppender {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Send entries to `writer` instead of stderr
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for ProcessLogAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ProcessLogAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut line = entry.to_process_line();
        line.push('\n');
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "process_log"
    }
}
