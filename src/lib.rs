//! # Component Logger
//!
//! A leveled logger for components running inside a host application that
//! may or may not carry an advanced logging backend.
//!
//! ## Features
//!
//! - **Layered configuration**: component env vars, global env vars, host
//!   constants and explicit options, resolved once per logger
//! - **Backend detection**: entries go to the host's logging backend when it
//!   has booted, to a protected daily file otherwise
//! - **Hook contract**: hosts can override, reroute or observe every call
//! - **Safe fallback files**: deny rules for web servers, exclusive locks
//!   around every append, retention sweeps
//!
//! ## Example
//!
//! ```no_run
//! use component_logger::prelude::*;
//!
//! let host = Host::builder()
//!     .environment(ProcessEnvironment)
//!     .uploads(StaticUploadDir("/var/www/uploads".into()))
//!     .build();
//!
//! let logger = ComponentLogger::new(LoggerOptions::new("my-plugin"), host)?;
//! logger.error("Payment failed", LogContext::new().with_field("order", 42));
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{
        DailyFileAppender, DirectoryProtector, ProcessLogAppender, RetentionSweeper, SweepReport,
    };
    pub use crate::core::{
        Appender, ComponentLogger, ComponentLoggerBuilder, Configuration, DebugInfo,
        HookRegistry, Host, HostBuilder, LogContext, LogEntry, LogLevel, LogMessage,
        LoggerError, LoggerMetrics, LoggerOptions, MapConstants, MapEnvironment,
        ProcessEnvironment, Result, StaticUploadDir,
    };
}

pub use appenders::{
    DailyFileAppender, DirectoryProtector, ProcessLogAppender, ProtectionOutcome,
    RetentionSweeper, SweepReport,
};
pub use core::{
    ActionTracker, Appender, BackendLogger, BackendRegistry, ComponentLogger,
    ComponentLoggerBuilder, ConfigResolver, Configuration, DebugInfo, Environment, HookBus,
    HookRegistry, Host, HostBuilder, HostConstants, LogContext, LogEntry, LogLevel, LogMessage,
    LoggerError, LoggerMetrics, LoggerOptions, MapConstants, MapEnvironment, MetricsSnapshot,
    ProcessEnvironment, RandomSource, Result, StaticUploadDir, ThreadRngSource,
    UploadDirResolver, DEFAULT_SWEEP_ONE_IN,
};
