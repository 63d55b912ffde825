//! Structured logging for the Vertex embeddings client.
//!
//! Provides trait-based logging with structured field support.

use serde_json::Value;
use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";

const SENSITIVE_KEYS: [&str; 8] = [
    "token",
    "access_token",
    "accessToken",
    "authorization",
    "Authorization",
    "secret",
    "password",
    "credential",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

fn level_value(level: LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
        LogLevel::Trace => 4,
    }
}

/// Structured logger implementation using the tracing crate.
///
/// Events carry the logger name as a `logger` field and the redacted
/// context as `fields`.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    ///
    /// # Example
    /// ```
    /// use integrations_vertex_embeddings::observability::StructuredLogger;
    ///
    /// let logger = StructuredLogger::new("vertex.embeddings");
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level_value(level) <= level_value(self.level)
    }

    /// Masks credentials in log data, recursing into nested objects.
    fn redact_sensitive_fields(fields: Value) -> Value {
        match fields {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        if SENSITIVE_KEYS.contains(&key.as_str()) {
                            (key, Value::String(REDACTED.to_string()))
                        } else {
                            (key, Self::redact_sensitive_fields(value))
                        }
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }

        let redacted_fields = Self::redact_sensitive_fields(fields);
        tracing::debug!(logger = %self.name, fields = %redacted_fields, "{}", message);
    }

    fn info(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Info) {
            return;
        }

        let redacted_fields = Self::redact_sensitive_fields(fields);
        tracing::info!(logger = %self.name, fields = %redacted_fields, "{}", message);
    }

    fn warn(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Warn) {
            return;
        }

        let redacted_fields = Self::redact_sensitive_fields(fields);
        tracing::warn!(logger = %self.name, fields = %redacted_fields, "{}", message);
    }

    fn error(&self, message: &str, fields: Value) {
        if !self.should_log(LogLevel::Error) {
            return;
        }

        let redacted_fields = Self::redact_sensitive_fields(fields);
        tracing::error!(logger = %self.name, fields = %redacted_fields, "{}", message);
    }
}

/// Logger that writes plain lines to stderr.
///
/// Handy when no tracing subscriber is installed.
pub struct DefaultLogger {
    prefix: String,
    level: LogLevel,
}

impl DefaultLogger {
    /// Creates a new default logger.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level_value(level) <= level_value(self.level)
    }

    #[allow(clippy::print_stderr)]
    fn emit(&self, label: &str, message: &str, context: Value) {
        let context = StructuredLogger::redact_sensitive_fields(context);
        eprintln!("[{}] {}: {} {}", self.prefix, label, message, context);
    }
}

impl Logger for DefaultLogger {
    fn debug(&self, message: &str, context: Value) {
        if self.should_log(LogLevel::Debug) {
            self.emit("DEBUG", message, context);
        }
    }

    fn info(&self, message: &str, context: Value) {
        if self.should_log(LogLevel::Info) {
            self.emit("INFO", message, context);
        }
    }

    fn warn(&self, message: &str, context: Value) {
        if self.should_log(LogLevel::Warn) {
            self.emit("WARN", message, context);
        }
    }

    fn error(&self, message: &str, context: Value) {
        if self.should_log(LogLevel::Error) {
            self.emit("ERROR", message, context);
        }
    }
}
