use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::ValidationError
            | ErrorCategory::NotFound
            | ErrorCategory::IoError
            | ErrorCategory::SerializationError => ErrorSeverity::Error,
            ErrorCategory::Unknown => ErrorSeverity::Info,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: HashMap::new(),
            recovery_suggestions: vec![],
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Build an error for a failed filesystem operation on `path`.
    ///
    /// `NotFound` io errors keep their own category so callers can tell a missing
    /// input apart from an unreadable one.
    pub fn from_io<T: Into<String>>(operation: T, path: &Path, err: io::Error) -> Self {
        let category = match err.kind() {
            io::ErrorKind::NotFound => ErrorCategory::NotFound,
            _ => ErrorCategory::IoError,
        };
        let code = match category {
            ErrorCategory::NotFound => "NOT_FOUND",
            _ => "IO_ERROR",
        };
        let mut error = AppError::new(
            category,
            format!("{} {}: {}", operation.into(), path.display(), err),
        )
        .with_code(code)
        .with_suggestion("Check that the path exists and is accessible");
        error.add_context("path", &path.display().to_string());
        error.source = Some(anyhow::anyhow!(err));
        error
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        let category = match e.kind() {
            io::ErrorKind::NotFound => ErrorCategory::NotFound,
            _ => ErrorCategory::IoError,
        };
        AppError {
            category,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::SerializationError, e.message())
            .with_code("CONFIG_PARSE_ERROR");
        error.source = Some(anyhow::anyhow!(e));
        error
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
}

/// Writes errors to stderr, one detail per indented line.
pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("[ERROR] {}: {}", error.code, error.message);
        let mut keys: Vec<&String> = error.context.keys().collect();
        keys.sort();
        for key in keys {
            eprintln!("  {}: {}", key, error.context[key]);
        }
        for suggestion in &error.recovery_suggestions {
            eprintln!("  Hint: {}", suggestion);
        }
    }
}
