//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// No component name in the options nor in the global environment key
    #[error("Component name is required: pass it in the options or set {env_key}")]
    MissingComponentName { env_key: String },

    /// Component name is blank after trimming
    #[error("Component name must not be empty")]
    EmptyComponentName,

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// The host provides no upload root to place log files under
    #[error("Upload directory is unavailable")]
    UploadDirUnavailable,

    /// The advanced backend refused to hand out a logger
    #[error("Backend '{namespace}' unavailable: {message}")]
    BackendUnavailable { namespace: String, message: String },
}

impl LoggerError {
    /// Create a missing component name error
    pub fn missing_component(env_key: impl Into<String>) -> Self {
        LoggerError::MissingComponentName {
            env_key: env_key.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create a backend unavailable error
    pub fn backend(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BackendUnavailable {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// Whether this error is raised at construction time and reaches the caller
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LoggerError::MissingComponentName { .. } | LoggerError::EmptyComponentName
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::missing_component("LOGGER_COMPONENT_NAME");
        assert!(matches!(err, LoggerError::MissingComponentName { .. }));
        assert!(err.is_config_error());

        let err = LoggerError::file_lock("/tmp/a.log");
        assert!(matches!(err, LoggerError::FileLockError { .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::missing_component("LOGGER_COMPONENT_NAME");
        assert_eq!(
            err.to_string(),
            "Component name is required: pass it in the options or set LOGGER_COMPONENT_NAME"
        );

        let err = LoggerError::backend("wonolog", "not booted");
        assert_eq!(err.to_string(), "Backend 'wonolog' unavailable: not booted");

        assert_eq!(
            LoggerError::EmptyComponentName.to_string(),
            "Component name must not be empty"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
