//! Configuration resolution
//!
//! A [`Configuration`] is assembled from five layers. Later layers in this
//! list lose to earlier ones:
//!
//! 1. component environment variable `{NORMALIZED}_{KEY}`
//! 2. global environment variable, e.g. `LOGGER_RETENTION_DAYS`
//! 3. host constant (retention only)
//! 4. explicit [`LoggerOptions`]
//! 5. built-in defaults
//!
//! A layer holding an unusable value is skipped, not treated as an error.

use super::error::{LoggerError, Result};
use super::host::{positive_int, Host};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Global environment key consulted when the options carry no component name
pub const COMPONENT_NAME_ENV_KEY: &str = "LOGGER_COMPONENT_NAME";

/// Suffixes appended to the normalized component name
pub const RETENTION_KEY: &str = "LOG_RETENTION_DAYS";
pub const MIN_LEVEL_KEY: &str = "LOG_MIN_LEVEL";
pub const BACKEND_NAMESPACE_KEY: &str = "BACKEND_NAMESPACE";
pub const DISABLE_KEY: &str = "DISABLE_LOGGING";

/// Global environment keys shared by every component
pub const GLOBAL_RETENTION_ENV: &str = "LOGGER_RETENTION_DAYS";
pub const GLOBAL_MIN_LEVEL_ENV: &str = "LOGGER_MIN_LEVEL";
pub const GLOBAL_BACKEND_NAMESPACE_ENV: &str = "LOGGER_BACKEND_NAMESPACE";
pub const GLOBAL_DISABLE_ENV: &str = "LOGGER_DISABLE_LOGGING";

pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const DEFAULT_BACKEND_NAMESPACE: &str = "wonolog";

/// Options passed explicitly by the caller.
///
/// Deserializable, so a host can hand over a JSON map:
///
/// ```
/// use component_logger::LoggerOptions;
///
/// let options: LoggerOptions =
///     serde_json::from_str(r#"{"component_name": "my-plugin", "retention_days": 14}"#).unwrap();
/// assert_eq!(options.retention_days, Some(14));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    pub component_name: Option<String>,
    pub retention_days: Option<i64>,
    pub backend_namespace: Option<String>,
    /// Level name; unknown names resolve to `debug`
    pub min_level: Option<String>,
    pub disabled_flag_name: Option<String>,
    pub retention_flag_name: Option<String>,
}

impl LoggerOptions {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: Some(component_name.into()),
            ..Default::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn retention_days(mut self, days: i64) -> Self {
        self.retention_days = Some(days);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backend_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.backend_namespace = Some(namespace.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: impl Into<String>) -> Self {
        self.min_level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disabled_flag_name(mut self, name: impl Into<String>) -> Self {
        self.disabled_flag_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn retention_flag_name(mut self, name: impl Into<String>) -> Self {
        self.retention_flag_name = Some(name.into());
        self
    }
}

/// Immutable configuration snapshot owned by one logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub component_name: String,
    pub retention_days: u32,
    pub backend_namespace: String,
    pub min_level: LogLevel,
    pub disabled_flag_name: String,
    pub retention_flag_name: String,
}

impl Configuration {
    /// Uppercased component name with non-alphanumerics replaced by `_`
    pub fn normalized_name(&self) -> String {
        normalize(&self.component_name)
    }

    /// Component-specific environment key, e.g. `MY_PLUGIN_LOG_MIN_LEVEL`
    pub fn component_env_key(&self, key: &str) -> String {
        component_env_key(&self.component_name, key)
    }
}

/// Uppercase `name` and replace every character outside `[A-Za-z0-9]` with `_`
pub fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub fn component_env_key(component_name: &str, key: &str) -> String {
    format!("{}_{}", normalize(component_name), key)
}

/// Merges defaults, options, host constants and environment into a [`Configuration`]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn resolve(options: &LoggerOptions, host: &Host) -> Result<Configuration> {
        let component_name = Self::component_name(options, host)?;
        let normalized = normalize(&component_name);

        let disabled_flag_name = non_blank(options.disabled_flag_name.as_deref())
            .unwrap_or_else(|| format!("{}_{}", normalized, DISABLE_KEY));
        let retention_flag_name = non_blank(options.retention_flag_name.as_deref())
            .unwrap_or_else(|| format!("{}_{}", normalized, RETENTION_KEY));

        let retention_days = Self::retention_days(&component_name, &retention_flag_name, options, host);

        let min_level = Self::env_layers(&component_name, MIN_LEVEL_KEY, GLOBAL_MIN_LEVEL_ENV, host)
            .or_else(|| non_blank(options.min_level.as_deref()))
            .map(|name| LogLevel::parse_lossy(&name))
            .unwrap_or_default();

        let backend_namespace = Self::env_layers(&component_name, BACKEND_NAMESPACE_KEY, GLOBAL_BACKEND_NAMESPACE_ENV, host)
            .or_else(|| non_blank(options.backend_namespace.as_deref()))
            .unwrap_or_else(|| DEFAULT_BACKEND_NAMESPACE.to_string());

        Ok(Configuration {
            component_name,
            retention_days,
            backend_namespace,
            min_level,
            disabled_flag_name,
            retention_flag_name,
        })
    }

    fn component_name(options: &LoggerOptions, host: &Host) -> Result<String> {
        let raw = options
            .component_name
            .clone()
            .or_else(|| host.env_string(COMPONENT_NAME_ENV_KEY))
            .ok_or_else(|| LoggerError::missing_component(COMPONENT_NAME_ENV_KEY))?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LoggerError::EmptyComponentName);
        }
        Ok(trimmed.to_string())
    }

    /// First non-blank value among the component and global environment keys
    fn env_layers(component_name: &str, key: &str, global_key: &str, host: &Host) -> Option<String> {
        non_blank(host.env_string(&component_env_key(component_name, key)).as_deref())
            .or_else(|| non_blank(host.env_string(global_key).as_deref()))
    }

    fn retention_days(
        component_name: &str,
        retention_flag_name: &str,
        options: &LoggerOptions,
        host: &Host,
    ) -> u32 {
        let from_env = |key: &str| {
            host.env_int(key)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
        };

        from_env(&component_env_key(component_name, RETENTION_KEY))
            .or_else(|| from_env(GLOBAL_RETENTION_ENV))
            .or_else(|| host.constant(retention_flag_name).as_ref().and_then(positive_int))
            .or_else(|| {
                options
                    .retention_days
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n > 0)
            })
            .unwrap_or(DEFAULT_RETENTION_DAYS)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{MapConstants, MapEnvironment};
    use std::sync::Arc;

    fn host_with(env: MapEnvironment) -> Host {
        Host::builder().environment(env).build()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigResolver::resolve(&LoggerOptions::new("my-plugin"), &Host::empty()).unwrap();
        assert_eq!(config.component_name, "my-plugin");
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.backend_namespace, DEFAULT_BACKEND_NAMESPACE);
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_derived_flag_names() {
        let config = ConfigResolver::resolve(&LoggerOptions::new("my-plugin"), &Host::empty()).unwrap();
        assert_eq!(config.disabled_flag_name, "MY_PLUGIN_DISABLE_LOGGING");
        assert_eq!(config.retention_flag_name, "MY_PLUGIN_LOG_RETENTION_DAYS");
    }

    #[test]
    fn test_explicit_flag_names_kept() {
        let options = LoggerOptions::new("x")
            .disabled_flag_name("QUIET")
            .retention_flag_name("KEEP_DAYS");
        let config = ConfigResolver::resolve(&options, &Host::empty()).unwrap();
        assert_eq!(config.disabled_flag_name, "QUIET");
        assert_eq!(config.retention_flag_name, "KEEP_DAYS");
    }

    #[test]
    fn test_component_name_trimmed() {
        let config = ConfigResolver::resolve(&LoggerOptions::new("  shop  "), &Host::empty()).unwrap();
        assert_eq!(config.component_name, "shop");
    }

    #[test]
    fn test_component_name_required() {
        let err = ConfigResolver::resolve(&LoggerOptions::default(), &Host::empty()).unwrap_err();
        assert!(matches!(err, LoggerError::MissingComponentName { .. }));

        let err = ConfigResolver::resolve(&LoggerOptions::new("   "), &Host::empty()).unwrap_err();
        assert!(matches!(err, LoggerError::EmptyComponentName));
    }

    #[test]
    fn test_component_name_from_global_env() {
        let host = host_with(MapEnvironment::new().with_var(COMPONENT_NAME_ENV_KEY, " env-comp "));
        let config = ConfigResolver::resolve(&LoggerOptions::default(), &host).unwrap();
        assert_eq!(config.component_name, "env-comp");
    }

    #[test]
    fn test_component_env_beats_global_env() {
        let host = host_with(
            MapEnvironment::new()
                .with_var("LOGGER_RETENTION_DAYS", "30")
                .with_var("MY_PLUGIN_LOG_RETENTION_DAYS", "90"),
        );
        let config = ConfigResolver::resolve(&LoggerOptions::new("my-plugin"), &host).unwrap();
        assert_eq!(config.retention_days, 90);
    }

    #[test]
    fn test_retention_priority_chain() {
        let constants = Arc::new(MapConstants::new().with("MY_PLUGIN_LOG_RETENTION_DAYS", 60));
        let options = LoggerOptions::new("my-plugin").retention_days(10);

        // constant beats explicit options
        let host = Host::builder().constants(constants.clone()).build();
        assert_eq!(ConfigResolver::resolve(&options, &host).unwrap().retention_days, 60);

        // global env beats constant
        let host = Host::builder()
            .constants(constants)
            .environment(MapEnvironment::new().with_var("LOGGER_RETENTION_DAYS", "45"))
            .build();
        assert_eq!(ConfigResolver::resolve(&options, &host).unwrap().retention_days, 45);

        // explicit options beat defaults
        assert_eq!(
            ConfigResolver::resolve(&options, &Host::empty()).unwrap().retention_days,
            10
        );
    }

    #[test]
    fn test_invalid_retention_layers_fall_through() {
        let constants = Arc::new(MapConstants::new().with("MY_PLUGIN_LOG_RETENTION_DAYS", "abc"));
        let host = Host::builder()
            .constants(constants)
            .environment(
                MapEnvironment::new()
                    .with_var("MY_PLUGIN_LOG_RETENTION_DAYS", "0")
                    .with_var("LOGGER_RETENTION_DAYS", "-5"),
            )
            .build();
        let options = LoggerOptions::new("my-plugin").retention_days(12);
        assert_eq!(ConfigResolver::resolve(&options, &host).unwrap().retention_days, 12);

        let options = LoggerOptions::new("my-plugin").retention_days(0);
        assert_eq!(ConfigResolver::resolve(&options, &host).unwrap().retention_days, 30);
    }

    #[test]
    fn test_retention_constant_uses_custom_flag_name() {
        let constants = Arc::new(MapConstants::new().with("KEEP_DAYS", 7));
        let host = Host::builder().constants(constants).build();
        let options = LoggerOptions::new("my-plugin").retention_flag_name("KEEP_DAYS");
        assert_eq!(ConfigResolver::resolve(&options, &host).unwrap().retention_days, 7);
    }

    #[test]
    fn test_min_level_layers() {
        let options = LoggerOptions::new("my-plugin").min_level("error");
        assert_eq!(
            ConfigResolver::resolve(&options, &Host::empty()).unwrap().min_level,
            LogLevel::Error
        );

        let host = host_with(
            MapEnvironment::new()
                .with_var("LOGGER_MIN_LEVEL", "notice")
                .with_var("MY_PLUGIN_LOG_MIN_LEVEL", "warning"),
        );
        assert_eq!(
            ConfigResolver::resolve(&options, &host).unwrap().min_level,
            LogLevel::Warning
        );
    }

    #[test]
    fn test_misspelled_min_level_logs_everything() {
        let options = LoggerOptions::new("my-plugin").min_level("eror");
        assert_eq!(
            ConfigResolver::resolve(&options, &Host::empty()).unwrap().min_level,
            LogLevel::Debug
        );
    }

    #[test]
    fn test_backend_namespace_layers() {
        let options = LoggerOptions::new("my-plugin").backend_namespace("acme::logs");
        assert_eq!(
            ConfigResolver::resolve(&options, &Host::empty())
                .unwrap()
                .backend_namespace,
            "acme::logs"
        );

        let host = host_with(MapEnvironment::new().with_var("LOGGER_BACKEND_NAMESPACE", "globalns"));
        assert_eq!(
            ConfigResolver::resolve(&options, &host).unwrap().backend_namespace,
            "globalns"
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("my-plugin"), "MY_PLUGIN");
        assert_eq!(normalize("shop.v2 beta"), "SHOP_V2_BETA");
        assert_eq!(component_env_key("a-b", MIN_LEVEL_KEY), "A_B_LOG_MIN_LEVEL");
    }

    #[test]
    fn test_options_from_json() {
        let options: LoggerOptions =
            serde_json::from_str(r#"{"component_name":"c","min_level":"alert"}"#).unwrap();
        let config = ConfigResolver::resolve(&options, &Host::empty()).unwrap();
        assert_eq!(config.min_level, LogLevel::Alert);
    }
}
