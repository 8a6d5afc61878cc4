//! Protected log directory bootstrap
//!
//! The fallback directory usually sits under a web-served upload root, so
//! before the first log file is created the directory gets deny rules for
//! Apache-style and IIS servers, directory-listing sentinels and a README
//! describing how to configure the component.
//!
//! Layout produced for `{root}/{component}/logs`:
//!
//! ```text
//! {root}/{component}/index.html
//! {root}/{component}/logs/.htaccess
//! {root}/{component}/logs/web.config
//! {root}/{component}/logs/index.html
//! {root}/{component}/logs/README.md
//! ```

use super::file::LOG_FILE_EXTENSION;
use crate::core::config::{
    Configuration, BACKEND_NAMESPACE_KEY, DISABLE_KEY, GLOBAL_BACKEND_NAMESPACE_ENV,
    GLOBAL_DISABLE_ENV, GLOBAL_MIN_LEVEL_ENV, GLOBAL_RETENTION_ENV, MIN_LEVEL_KEY, RETENTION_KEY,
};
use crate::core::{LoggerError, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

pub const HTACCESS_FILE: &str = ".htaccess";
pub const WEB_CONFIG_FILE: &str = "web.config";
pub const INDEX_FILE: &str = "index.html";
pub const README_FILE: &str = "README.md";

const INDEX_CONTENT: &str = "<!DOCTYPE html>\n<title>403 Forbidden</title>\n";

const WEB_CONFIG_CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<configuration>
  <system.webServer>
    <security>
      <authorization>
        <remove users="*" roles="" verbs="" />
        <add accessType="Deny" users="*" />
      </authorization>
    </security>
    <directoryBrowse enabled="false" />
  </system.webServer>
</configuration>
"#;

/// Prefix of the README line that changes between generations
pub const GENERATED_LINE_PREFIX: &str = "Generated: ";

/// Result of [`DirectoryProtector::ensure_protected`]
#[derive(Debug, Default)]
pub struct ProtectionOutcome {
    /// The directory was created by this call
    pub created: bool,
    /// Guard files that could not be written
    pub failures: Vec<LoggerError>,
}

impl ProtectionOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Creates the protected directory and its guard files
#[derive(Debug, Clone)]
pub struct DirectoryProtector {
    component_name: String,
    normalized_name: String,
    retention_days: u32,
    min_level: String,
    disabled_flag_name: String,
    retention_flag_name: String,
}

impl DirectoryProtector {
    pub fn new(config: &Configuration) -> Self {
        Self {
            component_name: config.component_name.clone(),
            normalized_name: config.normalized_name(),
            retention_days: config.retention_days,
            min_level: config.min_level.name().to_string(),
            disabled_flag_name: config.disabled_flag_name.clone(),
            retention_flag_name: config.retention_flag_name.clone(),
        }
    }

    /// Provision `log_dir` unless it already exists.
    ///
    /// Only a failure to create the directory is an error. Once it exists
    /// every guard file is attempted, deny rules first, and the ones that
    /// could not be written are listed in the outcome.
    pub fn ensure_protected(&self, log_dir: &Path) -> Result<ProtectionOutcome> {
        if log_dir.is_dir() {
            return Ok(ProtectionOutcome::default());
        }

        fs::create_dir_all(log_dir).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("Failed to create '{}'", log_dir.display()),
                e,
            )
        })?;

        let mut guards = vec![
            (log_dir.join(HTACCESS_FILE), self.htaccess()),
            (log_dir.join(WEB_CONFIG_FILE), WEB_CONFIG_CONTENT.to_string()),
            (log_dir.join(INDEX_FILE), INDEX_CONTENT.to_string()),
            (log_dir.join(README_FILE), self.readme()),
        ];
        if let Some(component_root) = log_dir.parent() {
            guards.push((component_root.join(INDEX_FILE), INDEX_CONTENT.to_string()));
        }

        let failures = guards
            .iter()
            .filter_map(|(path, content)| write_file(path, content).err())
            .collect();

        Ok(ProtectionOutcome {
            created: true,
            failures,
        })
    }

    fn htaccess(&self) -> String {
        format!(
            r#"# Deny all web access to this directory
<IfModule mod_authz_core.c>
    Require all denied
</IfModule>
<IfModule !mod_authz_core.c>
    Order deny,allow
    Deny from all
</IfModule>

# Deny log files by extension in case the rule above is overridden
<FilesMatch "\.({ext}|log|md|txt)$">
    <IfModule mod_authz_core.c>
        Require all denied
    </IfModule>
    <IfModule !mod_authz_core.c>
        Order deny,allow
        Deny from all
    </IfModule>
</FilesMatch>

Options -Indexes
"#,
            ext = LOG_FILE_EXTENSION
        )
    }

    fn readme(&self) -> String {
        let n = &self.normalized_name;
        format!(
            r#"# Log directory for {component}

Files in this directory are written by the fallback logger when no advanced
logging backend is active. One file is created per UTC day and files older
than the retention window are removed automatically.

Current retention: {retention} days
Current minimum level: {min_level}

## Environment variables

Component specific (take precedence):

- `{n}_{retention_key}`: days to keep log files
- `{n}_{min_level_key}`: minimum level (debug, info, notice, warning, error, critical, alert, emergency)
- `{n}_{backend_key}`: namespace of the advanced logging backend
- `{n}_{disable_key}`: set to `true` to stop writing log files

Global (apply to every component):

- `{g_retention}`
- `{g_min_level}`
- `{g_backend}`
- `{g_disable}`

## Host constants

- `{retention_flag}`: positive integer, days to keep log files
- `{disabled_flag}`: truthy value stops writing log files

{generated}{now} UTC
"#,
            component = self.component_name,
            retention = self.retention_days,
            min_level = self.min_level,
            n = n,
            retention_key = RETENTION_KEY,
            min_level_key = MIN_LEVEL_KEY,
            backend_key = BACKEND_NAMESPACE_KEY,
            disable_key = DISABLE_KEY,
            g_retention = GLOBAL_RETENTION_ENV,
            g_min_level = GLOBAL_MIN_LEVEL_ENV,
            g_backend = GLOBAL_BACKEND_NAMESPACE_ENV,
            g_disable = GLOBAL_DISABLE_ENV,
            retention_flag = self.retention_flag_name,
            disabled_flag = self.disabled_flag_name,
            generated = GENERATED_LINE_PREFIX,
            now = Utc::now().format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        LoggerError::io_operation(
            "writing protection file",
            format!("Failed to write '{}'", path.display()),
            e,
        )
    })
}
