//! Error types for nb-sentiment.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Model Not Found
//!   Reason: model not found: no model.json in any search location
//!   Fix: Pass --model <path> or set NBS_MODEL to a trained model file.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 11,
//!   "category": "config",
//!   "message": "model not found: no model.json in any search location",
//!   "recoverable": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Model artifact location, parsing and validation.
    Config,
    /// Malformed caller input (e.g. non-UTF-8 text).
    Input,
    /// File I/O and serialization.
    Io,
    /// Bugs.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for nb-sentiment.
#[derive(Error, Debug)]
pub enum Error {
    // Model errors (11-19)
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("model schema version mismatch: expected {expected}, got {actual}")]
    SchemaVersion { expected: String, actual: String },

    #[error("cannot read model {}: {reason}", .path.display())]
    ModelUnreadable { path: PathBuf, reason: String },

    // Input errors (20-29)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (90-99)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 11-19: Model errors
    /// - 20-29: Input errors
    /// - 60-69: I/O errors
    /// - 90-99: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::ModelNotFound(_) => 11,
            Error::InvalidModel(_) => 12,
            Error::SchemaVersion { .. } => 13,
            Error::ModelUnreadable { .. } => 14,
            Error::InvalidInput(_) => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Internal(_) => 90,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ModelNotFound(_)
            | Error::InvalidModel(_)
            | Error::SchemaVersion { .. }
            | Error::ModelUnreadable { .. } => ErrorCategory::Config,
            Error::InvalidInput(_) => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns whether this error can be fixed by the operator.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Internal(_))
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::ModelNotFound(_) => {
                "Pass --model <path> or set NBS_MODEL to a trained model file."
            }
            Error::InvalidModel(_) => {
                "Re-export the model from the trainer; every value must be a finite number."
            }
            Error::SchemaVersion { .. } => {
                "Re-export the model with a trainer that writes the current schema version."
            }
            Error::ModelUnreadable { .. } => {
                "Point --model at a readable UTF-8 JSON file, not a directory."
            }
            Error::InvalidInput(_) => "Provide UTF-8 text, one message per line for --stdin.",
            Error::Io(_) => "Check that the file exists and is readable, then retry.",
            Error::Json(_) => "Invalid JSON in file. Check syntax with 'jq . <file>'.",
            Error::Internal(_) => "This is a bug. Please report it with the command you ran.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::ModelNotFound(_) => "Model Not Found",
            Error::InvalidModel(_) => "Invalid Model",
            Error::SchemaVersion { .. } => "Model Schema Mismatch",
            Error::ModelUnreadable { .. } => "Model Unreadable",
            Error::InvalidInput(_) => "Invalid Input",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Internal(_) => "Internal Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Remediation hint.
    pub remediation: String,

    /// Additional structured context (e.g. file path).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::SchemaVersion { expected, actual } => {
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            Error::ModelUnreadable { path, .. } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
