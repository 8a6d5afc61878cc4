//! Log entry structure and text rendering

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::path::Path;

/// Separator line closing every record in a fallback file
pub const RECORD_SEPARATOR: &str = "---";

/// Timestamp layout used in entry headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What was logged, resolved once at the call boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogMessage {
    /// Plain text, written unchanged
    Text { text: String },
    /// Arbitrary structured data
    Structured { data: Value },
    /// An error with the source location it was raised at
    ErrorLike {
        description: String,
        file: String,
        line: u32,
    },
    /// A host soft error that only carries a message
    SoftError { message: String },
}

impl LogMessage {
    pub fn text(text: impl Into<String>) -> Self {
        LogMessage::Text { text: text.into() }
    }

    pub fn structured(data: impl Into<Value>) -> Self {
        LogMessage::Structured { data: data.into() }
    }

    pub fn soft_error(message: impl Into<String>) -> Self {
        LogMessage::SoftError {
            message: message.into(),
        }
    }

    pub fn error_at(description: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        LogMessage::ErrorLike {
            description: description.into(),
            file: file.into(),
            line,
        }
    }

    /// Capture an error together with the caller's source location
    #[track_caller]
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let location = Location::caller();
        Self::error_at(error.to_string(), location.file(), location.line())
    }

    /// Render the message as a single string
    pub fn format(&self) -> String {
        match self {
            LogMessage::ErrorLike {
                description,
                file,
                line,
            } => {
                let base = Path::new(file)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.clone());
                format!("{} in {}:{}", description, base, line)
            }
            LogMessage::SoftError { message } => message.clone(),
            LogMessage::Structured { data } => format!("Data: {}", data),
            LogMessage::Text { text } => text.clone(),
        }
    }

    /// Payload form handed to hooks: structured data stays structured,
    /// everything else is its rendered string
    pub fn to_value(&self) -> Value {
        match self {
            LogMessage::Structured { data } => data.clone(),
            LogMessage::Text { text } => Value::String(text.clone()),
            other => Value::String(other.format()),
        }
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage::Text { text: s }
    }
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage::Text {
            text: s.to_string(),
        }
    }
}

impl From<&String> for LogMessage {
    fn from(s: &String) -> Self {
        LogMessage::Text { text: s.clone() }
    }
}

/// JSON strings stay text; everything else is structured data
impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => LogMessage::Text { text },
            data => LogMessage::Structured { data },
        }
    }
}

/// A single log call on its way to an output
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: LogMessage,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "LogContext::is_empty")]
    pub context: LogContext,
    /// Deployment environment; omitted from the header in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: LogMessage, context: LogContext) -> Self {
        Self {
            level,
            message,
            timestamp: Utc::now(),
            context,
            environment: None,
        }
    }

    /// Tag the entry with the environment type unless it is production
    pub fn with_environment(mut self, environment_type: &str) -> Self {
        self.environment = if environment_type.is_empty() || environment_type == "production" {
            None
        } else {
            Some(environment_type.to_string())
        };
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Formatted, sanitized message text
    pub fn formatted_message(&self) -> String {
        Self::sanitize_message(&self.message.format())
    }

    /// `[{timestamp}][{env}] {LEVEL}: {message}`
    pub fn header(&self) -> String {
        let env = self
            .environment
            .as_deref()
            .map(|e| format!("[{}]", e))
            .unwrap_or_default();
        format!(
            "[{}]{} {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            env,
            self.level,
            self.formatted_message()
        )
    }

    /// Multi-line record for a fallback file, terminated by the separator
    pub fn to_file_record(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        if !self.context.is_empty() {
            out.push_str("Context: ");
            out.push_str(&self.context.to_json());
            out.push('\n');
        }
        out.push_str(RECORD_SEPARATOR);
        out.push('\n');
        out
    }

    /// Single-line rendering for the process log
    pub fn to_process_line(&self) -> String {
        let mut out = self.header();
        if !self.context.is_empty() {
            out.push_str(" Context: ");
            out.push_str(&self.context.to_json());
        }
        out
    }
}
