//! Host capabilities consumed by the logger
//!
//! Every collaborator is optional. Whether one is present is decided once,
//! when the [`Host`] is built; a missing capability silently disables the
//! feature that depends on it.

use super::error::Result;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use parking_lot::RwLock;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Environment key read by [`ProcessEnvironment::is_debug`]
pub const DEBUG_ENV_KEY: &str = "LOGGER_DEBUG";

/// Environment key read by [`ProcessEnvironment::environment_type`]
pub const ENVIRONMENT_TYPE_ENV_KEY: &str = "LOGGER_ENVIRONMENT_TYPE";

/// Filter/action event bus.
///
/// Filters thread a value through every registered callback; actions are
/// fire-and-forget broadcasts.
pub trait HookBus: Send + Sync {
    fn apply_filters(&self, name: &str, value: Value, args: &[Value]) -> Value;
    fn do_action(&self, name: &str, args: &[Value]);
}

/// Reports how many times an action has fired in this process
pub trait ActionTracker: Send + Sync {
    fn times_fired(&self, action: &str) -> usize;
}

/// Read-only access to environment variables and host runtime flags
pub trait Environment: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;

    /// Integer value of `key`; `None` when unset or not an integer
    fn get_int(&self, key: &str) -> Option<i64> {
        self.get_string(key)?.trim().parse().ok()
    }

    /// Truthiness of `key`; unset or unrecognised values are false
    fn get_bool(&self, key: &str) -> bool {
        self.get_string(key).map_or(false, |v| parse_bool(&v))
    }

    /// Whether the host runs in debug/development mode
    fn is_debug(&self) -> bool {
        false
    }

    /// Deployment environment name, `production` unless told otherwise
    fn environment_type(&self) -> String {
        "production".to_string()
    }
}

/// Named constants defined by the host
pub trait HostConstants: Send + Sync {
    fn constant_value(&self, name: &str) -> Option<Value>;

    fn is_defined(&self, name: &str) -> bool {
        self.constant_value(name).is_some()
    }
}

/// Resolves the root directory under which per-component folders live
pub trait UploadDirResolver: Send + Sync {
    fn upload_base_dir(&self) -> Option<PathBuf>;
}

/// Source of randomness for sampled work
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `min..=max`
    fn random_int(&self, min: u32, max: u32) -> u32;
}

/// A logger handed out by the advanced backend
pub trait BackendLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext);
}

/// Introspection into the advanced backend, if the host carries one.
///
/// Paths use `::` separators, e.g. `wonolog::Configurator::ACTION_SETUP`.
pub trait BackendRegistry: Send + Sync {
    /// Whether a type exists at `path`
    fn has_type(&self, path: &str) -> bool;

    /// Value of the symbol at `path`, if defined
    fn symbol(&self, path: &str) -> Option<String>;

    /// A logger bound to `channel`
    fn logger(&self, namespace: &str, channel: &str) -> Result<Arc<dyn BackendLogger>>;
}

/// Interprets a string flag the way hosts usually do: `1`, `true`, `on`, `yes`.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Truthiness of a constant value.
///
/// `null`, `false`, `0`, `""`, `"0"` and empty collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Positive integer value of a constant, accepting numeric strings
pub fn positive_int(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n > 0)
}

/// Environment backed by the real process environment
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get_string(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn is_debug(&self) -> bool {
        self.get_bool(DEBUG_ENV_KEY)
    }

    fn environment_type(&self) -> String {
        self.get_string(ENVIRONMENT_TYPE_ENV_KEY)
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "production".to_string())
    }
}

/// In-memory environment, handy for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    debug: bool,
    environment_type: Option<String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_environment_type(mut self, env_type: impl Into<String>) -> Self {
        self.environment_type = Some(env_type.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn get_string(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn is_debug(&self) -> bool {
        self.debug
    }

    fn environment_type(&self) -> String {
        self.environment_type
            .clone()
            .unwrap_or_else(|| "production".to_string())
    }
}

/// Host constants table that can be filled at runtime
#[derive(Debug, Clone, Default)]
pub struct MapConstants {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl MapConstants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a constant; redefining keeps the first value, like host constants do
    pub fn define(&self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let mut values = self.values.write();
        let name = name.into();
        if values.contains_key(&name) {
            return false;
        }
        values.insert(name, value.into());
        true
    }

    #[must_use]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, value);
        self
    }
}

impl HostConstants for MapConstants {
    fn constant_value(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }
}

/// Upload root fixed at construction
#[derive(Debug, Clone)]
pub struct StaticUploadDir(pub PathBuf);

impl UploadDirResolver for StaticUploadDir {
    fn upload_base_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Random source backed by `rand::thread_rng`
#[derive(Debug, Clone, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn random_int(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// The set of host capabilities a logger is wired to
#[derive(Clone)]
pub struct Host {
    hooks: Option<Arc<dyn HookBus>>,
    actions: Option<Arc<dyn ActionTracker>>,
    environment: Option<Arc<dyn Environment>>,
    constants: Option<Arc<dyn HostConstants>>,
    uploads: Option<Arc<dyn UploadDirResolver>>,
    random: Arc<dyn RandomSource>,
    backend: Option<Arc<dyn BackendRegistry>>,
}

impl Host {
    /// Host with no capabilities beyond randomness
    pub fn empty() -> Self {
        Self {
            hooks: None,
            actions: None,
            environment: None,
            constants: None,
            uploads: None,
            random: Arc::new(ThreadRngSource),
            backend: None,
        }
    }

    /// Host reading the real process environment
    pub fn from_process() -> Self {
        Self::builder().environment(ProcessEnvironment).build()
    }

    #[must_use]
    pub fn builder() -> HostBuilder {
        HostBuilder::new()
    }

    pub fn hooks(&self) -> Option<&Arc<dyn HookBus>> {
        self.hooks.as_ref()
    }

    pub fn actions(&self) -> Option<&Arc<dyn ActionTracker>> {
        self.actions.as_ref()
    }

    pub fn backend(&self) -> Option<&Arc<dyn BackendRegistry>> {
        self.backend.as_ref()
    }

    pub fn random(&self) -> &Arc<dyn RandomSource> {
        &self.random
    }

    pub fn has_hooks(&self) -> bool {
        self.hooks.is_some()
    }

    pub fn env_string(&self, key: &str) -> Option<String> {
        self.environment.as_ref()?.get_string(key)
    }

    pub fn env_int(&self, key: &str) -> Option<i64> {
        self.environment.as_ref()?.get_int(key)
    }

    pub fn env_bool(&self, key: &str) -> bool {
        self.environment
            .as_ref()
            .map_or(false, |env| env.get_bool(key))
    }

    pub fn is_debug(&self) -> bool {
        self.environment.as_ref().map_or(false, |env| env.is_debug())
    }

    pub fn environment_type(&self) -> String {
        self.environment
            .as_ref()
            .map(|env| env.environment_type())
            .unwrap_or_else(|| "production".to_string())
    }

    pub fn constant(&self, name: &str) -> Option<Value> {
        self.constants.as_ref()?.constant_value(name)
    }

    pub fn is_constant_defined(&self, name: &str) -> bool {
        self.constants
            .as_ref()
            .map_or(false, |constants| constants.is_defined(name))
    }

    pub fn upload_base_dir(&self) -> Option<PathBuf> {
        self.uploads.as_ref()?.upload_base_dir()
    }

    /// Run a filter; without a hook bus the value passes through unchanged
    pub fn apply_filters(&self, name: &str, value: Value, args: &[Value]) -> Value {
        match self.hooks {
            Some(ref hooks) => hooks.apply_filters(name, value, args),
            None => value,
        }
    }

    /// Fire an action; a no-op without a hook bus
    pub fn do_action(&self, name: &str, args: &[Value]) {
        if let Some(ref hooks) = self.hooks {
            hooks.do_action(name, args);
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("hooks", &self.hooks.is_some())
            .field("actions", &self.actions.is_some())
            .field("environment", &self.environment.is_some())
            .field("constants", &self.constants.is_some())
            .field("uploads", &self.uploads.is_some())
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

/// Builder for [`Host`]
///
/// # Example
/// ```
/// use component_logger::core::host::{Host, MapEnvironment, StaticUploadDir};
///
/// let host = Host::builder()
///     .environment(MapEnvironment::new().with_var("LOGGER_RETENTION_DAYS", "7"))
///     .uploads(StaticUploadDir("/srv/uploads".into()))
///     .build();
/// assert_eq!(host.env_int("LOGGER_RETENTION_DAYS"), Some(7));
/// ```
pub struct HostBuilder {
    host: Host,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self { host: Host::empty() }
    }

    /// Use one registry as both the hook bus and the action tracker
    #[must_use = "builder methods return a new value"]
    pub fn hook_registry<H>(mut self, registry: Arc<H>) -> Self
    where
        H: HookBus + ActionTracker + 'static,
    {
        self.host.hooks = Some(registry.clone() as Arc<dyn HookBus>);
        self.host.actions = Some(registry as Arc<dyn ActionTracker>);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hooks(mut self, hooks: Arc<dyn HookBus>) -> Self {
        self.host.hooks = Some(hooks);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn actions(mut self, actions: Arc<dyn ActionTracker>) -> Self {
        self.host.actions = Some(actions);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn environment<E: Environment + 'static>(mut self, environment: E) -> Self {
        self.host.environment = Some(Arc::new(environment));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn constants(mut self, constants: Arc<dyn HostConstants>) -> Self {
        self.host.constants = Some(constants);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn uploads<U: UploadDirResolver + 'static>(mut self, uploads: U) -> Self {
        self.host.uploads = Some(Arc::new(uploads));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn random<R: RandomSource + 'static>(mut self, random: R) -> Self {
        self.host.random = Arc::new(random);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backend(mut self, backend: Arc<dyn BackendRegistry>) -> Self {
        self.host.backend = Some(backend);
        self
    }

    pub fn build(self) -> Host {
        self.host
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
