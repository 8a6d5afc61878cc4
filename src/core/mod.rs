//! Core logger types and traits

pub mod appender;
pub mod backend;
pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;

pub use appender::Appender;
pub use backend::{BackendCache, BackendDetector};
pub use config::{ConfigResolver, Configuration, LoggerOptions};
pub use error::{LoggerError, Result};
pub use hooks::{fallback_hook, HookRegistry};
pub use host::{
    ActionTracker, BackendLogger, BackendRegistry, Environment, HookBus, Host, HostBuilder,
    HostConstants, MapConstants, MapEnvironment, ProcessEnvironment, RandomSource,
    StaticUploadDir, ThreadRngSource, UploadDirResolver,
};
pub use log_context::LogContext;
pub use log_entry::{LogEntry, LogMessage};
pub use log_level::{should_log, should_log_named, LogLevel};
pub use logger::{ComponentLogger, ComponentLoggerBuilder, DebugInfo, DEFAULT_SWEEP_ONE_IN};
pub use metrics::{LoggerMetrics, MetricsSnapshot};
