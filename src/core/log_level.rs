//! Log level definitions and the minimum-level gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight standard severities, in ascending order.
///
/// The discriminant is the priority; no two levels share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Alert = 6,
    Emergency = 7,
}

impl LogLevel {
    /// Every level, lowest priority first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    /// Lowercase name, as used in hook and action names
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    #[inline]
    pub fn priority(&self) -> u8 {
        *self as u8
    }

    /// Parse a level name, falling back to `Debug` for anything unrecognised.
    ///
    /// A misspelled minimum level therefore lets every message through.
    /// TODO: surface unrecognised names in `DebugInfo` once hosts can act on it.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or(LogLevel::Debug)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "notice" => Ok(LogLevel::Notice),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            "alert" => Ok(LogLevel::Alert),
            "emergency" => Ok(LogLevel::Emergency),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Priority for a level given by name; unknown names rank lowest.
pub fn priority_of(name: &str) -> u8 {
    name.parse::<LogLevel>().map(|l| l.priority()).unwrap_or(0)
}

/// Whether `level` meets the configured minimum.
#[inline]
pub fn should_log(level: LogLevel, min_level: LogLevel) -> bool {
    level.priority() >= min_level.priority()
}

/// String form of [`should_log`]. Unknown names on either side count as priority 0.
pub fn should_log_named(level: &str, min_level: &str) -> bool {
    priority_of(level) >= priority_of(min_level)
}
