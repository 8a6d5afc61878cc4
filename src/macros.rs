//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and log the result
//! with an empty context. Use the logger methods directly to attach context.
//!
//! # Examples
//!
//! ```
//! use component_logger::prelude::*;
//! use component_logger::{info, warning};
//!
//! let logger = ComponentLogger::new(LoggerOptions::new("shop"), Host::empty()).unwrap();
//!
//! info!(logger, "Cart service started");
//!
//! let pending = 3;
//! warning!(logger, "{} orders still pending", pending);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use component_logger::prelude::*;
/// # let logger = ComponentLogger::new(LoggerOptions::new("shop"), Host::empty()).unwrap();
/// use component_logger::log;
/// log!(logger, LogLevel::Notice, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::LogContext::new())
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use component_logger::prelude::*;
/// # let logger = ComponentLogger::new(LoggerOptions::new("shop"), Host::empty()).unwrap();
/// use component_logger::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
///
/// # Examples
///
/// ```
/// # use component_logger::prelude::*;
/// # let logger = ComponentLogger::new(LoggerOptions::new("shop"), Host::empty()).unwrap();
/// use component_logger::emergency;
/// emergency!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}
