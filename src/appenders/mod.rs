//! Fallback outputs and the housekeeping around them

pub mod file;
pub mod process_log;
pub mod protection;
pub mod retention;

pub use file::{component_hash, DailyFileAppender, LOG_FILE_EXTENSION};
pub use process_log::ProcessLogAppender;
pub use protection::{DirectoryProtector, ProtectionOutcome};
pub use retention::{RetentionSweeper, SweepReport};

pub use crate::core::Appender;
