//! Component logger facade
//!
//! Every call walks the same decision path:
//!
//! 1. the minimum-level gate, which rejects without firing any hook
//! 2. the override filter, which lets a host claim the call entirely
//! 3. the advanced backend when it is active, otherwise the fallback
//!    (process log in debug mode, else the protected daily file)
//! 4. the "logged" notification
//!
//! Nothing on this path returns an error to the caller. Write failures are
//! counted in [`LoggerMetrics`] and echoed to stderr when the host runs in
//! debug mode.

use super::{
    appender::Appender,
    backend::BackendDetector,
    config::{
        ConfigResolver, Configuration, LoggerOptions, DISABLE_KEY, GLOBAL_DISABLE_ENV,
        GLOBAL_RETENTION_ENV, RETENTION_KEY,
    },
    error::{LoggerError, Result},
    hooks::{
        fallback_hook, HOOK_BACKEND_ACTION, HOOK_BACKEND_PREFIX, HOOK_FALLBACK, HOOK_LOGGED,
        HOOK_OVERRIDE_LOG,
    },
    host::{is_truthy, BackendLogger, Host},
    log_context::LogContext,
    log_entry::{LogEntry, LogMessage},
    log_level::{should_log, LogLevel},
    metrics::{LoggerMetrics, MetricsSnapshot},
};
use crate::appenders::{DailyFileAppender, DirectoryProtector, ProcessLogAppender, RetentionSweeper};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A fallback write triggers a retention sweep with probability `1 / N`
pub const DEFAULT_SWEEP_ONE_IN: u32 = 100;

/// Snapshot of a logger's resolved state, for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    pub config: Configuration,
    pub backend_namespace: String,
    pub backend_active: bool,
    pub logging_disabled: bool,
    /// Raw value of the global disable variable
    pub global_disable_env: Option<String>,
    /// Raw value of the component disable variable
    pub component_disable_env: Option<String>,
    pub global_retention_env: Option<String>,
    pub component_retention_env: Option<String>,
    /// Whether the host defines the disable constant, whatever its value
    pub disabled_constant_defined: bool,
    pub retention_constant_defined: bool,
    pub debug_mode: bool,
    pub environment_type: String,
    pub hooks_available: bool,
    pub log_directory: Option<PathBuf>,
    pub metrics: MetricsSnapshot,
}

pub struct ComponentLogger {
    config: Configuration,
    /// `config` as passed to the override filter
    config_value: Value,
    host: Host,
    detector: BackendDetector,
    protector: DirectoryProtector,
    sweeper: RetentionSweeper,
    file: Option<DailyFileAppender>,
    process_log: ProcessLogAppender,
    sweep_one_in: u32,
    metrics: Arc<LoggerMetrics>,
}

impl ComponentLogger {
    /// Logger for `options` wired to `host`, with default outputs
    pub fn new(options: LoggerOptions, host: Host) -> Result<Self> {
        Self::builder(options).host(host).build()
    }

    #[must_use]
    pub fn builder(options: LoggerOptions) -> ComponentLoggerBuilder {
        ComponentLoggerBuilder::new(options)
    }

    fn from_parts(
        config: Configuration,
        host: Host,
        process_log: ProcessLogAppender,
        sweep_one_in: u32,
    ) -> Result<Self> {
        let config_value = serde_json::to_value(&config)?;
        let file = host
            .upload_base_dir()
            .map(|root| root.join(&config.component_name).join("logs"))
            .map(|dir| DailyFileAppender::new(dir, &config.component_name));

        Ok(Self {
            detector: BackendDetector::new(config.backend_namespace.clone()),
            protector: DirectoryProtector::new(&config),
            sweeper: RetentionSweeper::new(),
            config,
            config_value,
            host,
            file,
            process_log,
            sweep_one_in: sweep_one_in.max(1),
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }

    pub fn log(&self, level: LogLevel, message: impl Into<LogMessage>, context: LogContext) {
        if !should_log(level, self.config.min_level) {
            self.metrics.record_suppressed_by_level();
            return;
        }

        let message = message.into();
        let level_value = Value::String(level.name().to_string());
        let message_value = message.to_value();
        let context_value = context.to_value();

        let handled = self.host.apply_filters(
            HOOK_OVERRIDE_LOG,
            Value::Null,
            &[
                level_value.clone(),
                message_value.clone(),
                context_value.clone(),
                self.config_value.clone(),
            ],
        );
        if !handled.is_null() {
            self.metrics.record_overridden();
            return;
        }

        if self.detector.is_active(&self.host) {
            if !self.dispatch_to_backend(level, &level_value, &message_value, &context_value) {
                return;
            }
        } else {
            self.write_fallback(LogEntry::new(level, message, context));
        }

        self.host.do_action(
            HOOK_LOGGED,
            &[
                level_value,
                message_value,
                context_value,
                Value::String(self.config.component_name.clone()),
            ],
        );
    }

    /// Fire the backend's level action; false when the backend has no log marker
    fn dispatch_to_backend(
        &self,
        level: LogLevel,
        level_value: &Value,
        message: &Value,
        context: &Value,
    ) -> bool {
        let Some(marker) = self.detector.log_marker(&self.host) else {
            return false;
        };

        let prefix = match self
            .host
            .apply_filters(HOOK_BACKEND_PREFIX, Value::String(marker.clone()), &[])
        {
            Value::String(prefix) => prefix,
            _ => marker,
        };
        let default_action = format!("{}.{}", prefix, level.name());
        let action = match self.host.apply_filters(
            HOOK_BACKEND_ACTION,
            Value::String(default_action.clone()),
            std::slice::from_ref(level_value),
        ) {
            Value::String(action) => action,
            _ => default_action,
        };

        self.host.do_action(
            &action,
            &[json!({ "message": message, "context": context })],
        );
        self.metrics.record_backend_dispatch();
        true
    }

    fn write_fallback(&self, entry: LogEntry) {
        let args = [
            Value::String(entry.level.name().to_string()),
            entry.message.to_value(),
            entry.context.to_value(),
        ];
        self.host.do_action(HOOK_FALLBACK, &args);
        self.host.do_action(&fallback_hook(entry.level), &args);

        let entry = entry.with_environment(&self.host.environment_type());

        if self.host.is_debug() {
            match self.process_log.append(&entry) {
                Ok(()) => self.metrics.record_process_log_write(),
                Err(e) => self.report_failure("process log write", &e),
            }
            return;
        }

        if self.is_logging_disabled() {
            self.metrics.record_suppressed_by_flag();
            return;
        }

        if let Err(e) = self.write_file(&entry) {
            self.report_failure("fallback file write", &e);
        }
    }

    fn write_file(&self, entry: &LogEntry) -> Result<()> {
        let file = self.file.as_ref().ok_or(LoggerError::UploadDirUnavailable)?;
        let outcome = self.protector.ensure_protected(file.log_dir())?;
        for _ in &outcome.failures {
            self.metrics.record_guard_failure();
        }
        file.append(entry)?;
        self.metrics.record_file_write();

        if self.host.random().random_int(1, self.sweep_one_in) == 1 {
            self.sweep(file.log_dir());
        }
        Ok(())
    }

    fn sweep(&self, log_dir: &Path) {
        match self.sweeper.sweep(log_dir, self.config.retention_days) {
            Ok(report) => {
                self.metrics.record_sweep(report.deleted);
                if report.failed > 0 && self.host.is_debug() {
                    eprintln!(
                        "[LOGGER WARNING] {}: {} expired log files could not be removed",
                        self.config.component_name, report.failed
                    );
                }
            }
            Err(e) => self.report_failure("retention sweep", &e),
        }
    }

    fn report_failure(&self, operation: &str, error: &LoggerError) {
        self.metrics.record_write_failure();
        if self.host.is_debug() {
            eprintln!(
                "[LOGGER ERROR] {}: {} failed: {}",
                self.config.component_name, operation, error
            );
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Debug, message, context);
    }

    #[inline]
    pub fn info(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Info, message, context);
    }

    #[inline]
    pub fn notice(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Notice, message, context);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Warning, message, context);
    }

    #[inline]
    pub fn error(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Error, message, context);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Critical, message, context);
    }

    #[inline]
    pub fn alert(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Alert, message, context);
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<LogMessage>, context: LogContext) {
        self.log(LogLevel::Emergency, message, context);
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Whether the global or component disable switch is on
    pub fn is_logging_disabled(&self) -> bool {
        self.host.env_bool(GLOBAL_DISABLE_ENV)
            || self.host.env_bool(&self.config.component_env_key(DISABLE_KEY))
            || self
                .host
                .constant(&self.config.disabled_flag_name)
                .is_some_and(|value| is_truthy(&value))
    }

    pub fn is_backend_active(&self) -> bool {
        self.detector.is_active(&self.host)
    }

    /// Forget the memoized backend state so the next call detects again
    pub fn refresh_backend_cache(&self) {
        self.detector.refresh();
    }

    /// A backend logger on this component's channel.
    ///
    /// `None` when the backend is inactive or refuses to hand one out.
    pub fn backend_logger(&self) -> Option<Arc<dyn BackendLogger>> {
        if !self.is_backend_active() {
            return None;
        }
        let registry = self.host.backend()?;
        let namespace = self.detector.namespace(&self.host);
        match registry.logger(&namespace, &self.config.component_name) {
            Ok(logger) => Some(logger),
            Err(e) => {
                if self.host.is_debug() {
                    eprintln!("[LOGGER ERROR] {}: {}", self.config.component_name, e);
                }
                None
            }
        }
    }

    /// `{uploads}/{component}/logs`, when the host has an upload root
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.file.as_ref().map(|file| file.log_dir().to_path_buf())
    }

    pub fn debug_info(&self) -> DebugInfo {
        DebugInfo {
            config: self.config.clone(),
            backend_namespace: self.detector.namespace(&self.host),
            backend_active: self.is_backend_active(),
            logging_disabled: self.is_logging_disabled(),
            global_disable_env: self.host.env_string(GLOBAL_DISABLE_ENV),
            component_disable_env: self
                .host
                .env_string(&self.config.component_env_key(DISABLE_KEY)),
            global_retention_env: self.host.env_string(GLOBAL_RETENTION_ENV),
            component_retention_env: self
                .host
                .env_string(&self.config.component_env_key(RETENTION_KEY)),
            disabled_constant_defined: self
                .host
                .is_constant_defined(&self.config.disabled_flag_name),
            retention_constant_defined: self
                .host
                .is_constant_defined(&self.config.retention_flag_name),
            debug_mode: self.host.is_debug(),
            environment_type: self.host.environment_type(),
            hooks_available: self.host.has_hooks(),
            log_directory: self.log_directory(),
            metrics: self.metrics.snapshot(),
        }
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use component_logger::{ComponentLogger, Host, LogContext, LoggerOptions};
    ///
    /// let logger = ComponentLogger::new(
    ///     LoggerOptions::new("shop").min_level("error"),
    ///     Host::empty(),
    /// ).unwrap();
    ///
    /// logger.info("ignored", LogContext::new());
    /// assert_eq!(logger.metrics().suppressed_by_level(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush the process log writer
    pub fn flush(&self) -> Result<()> {
        self.process_log.flush()
    }
}

impl std::fmt::Debug for ComponentLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLogger")
            .field("config", &self.config)
            .field("host", &self.host)
            .field("log_directory", &self.log_directory())
            .finish()
    }
}

/// Builder for [`ComponentLogger`]
///
/// # Example
/// ```
/// use component_logger::{ComponentLogger, Host, LoggerOptions};
///
/// let logger = ComponentLogger::builder(LoggerOptions::new("my-plugin").retention_days(7))
///     .host(Host::empty())
///     .sweep_one_in(50)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.config().retention_days, 7);
/// ```
pub struct ComponentLoggerBuilder {
    options: LoggerOptions,
    host: Option<Host>,
    process_log_writer: Option<Box<dyn Write + Send>>,
    sweep_one_in: u32,
}

impl ComponentLoggerBuilder {
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            options,
            host: None,
            process_log_writer: None,
            sweep_one_in: DEFAULT_SWEEP_ONE_IN,
        }
    }

    /// Host capabilities; defaults to [`Host::from_process`]
    #[must_use = "builder methods return a new value"]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Destination of debug-mode output; stderr by default
    #[must_use = "builder methods return a new value"]
    pub fn process_log_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.process_log_writer = Some(writer);
        self
    }

    /// Run a retention sweep after roughly one in `n` file writes.
    ///
    /// `0` is treated as `1`, sweeping after every write.
    #[must_use = "builder methods return a new value"]
    pub fn sweep_one_in(mut self, n: u32) -> Self {
        self.sweep_one_in = n;
        self
    }

    /// Resolve the configuration and build the logger.
    ///
    /// Fails only when no usable component name can be found.
    pub fn build(self) -> Result<ComponentLogger> {
        let host = self.host.unwrap_or_else(Host::from_process);
        let config = ConfigResolver::resolve(&self.options, &host)?;
        let process_log = match self.process_log_writer {
            Some(writer) => ProcessLogAppender::with_writer(writer),
            None => ProcessLogAppender::new(),
        };
        ComponentLogger::from_parts(config, host, process_log, self.sweep_one_in)
    }
}
