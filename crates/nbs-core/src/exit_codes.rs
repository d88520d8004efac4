//! Exit codes for the `nbs` CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes (not errors)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use nbs_common::{Error, ErrorCategory};

/// Exit codes for nbs operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Success: positive message, batch scored, or command completed
    Clean = 0,

    /// A single message scored negative
    NegativeSentiment = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or input
    ArgsError = 10,

    /// Model missing, unreadable or invalid
    ModelError = 11,

    /// Model schema version not supported
    VersionError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::NegativeSentiment => "OK_NEGATIVE",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ModelError => "ERR_MODEL",
            ExitCode::VersionError => "ERR_VERSION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Map a library error to the exit code the CLI reports for it.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::SchemaVersion { .. } => ExitCode::VersionError,
            Error::ModelNotFound(_) | Error::InvalidModel(_) | Error::ModelUnreadable { .. } => {
                ExitCode::ModelError
            }
            Error::InvalidInput(_) => ExitCode::ArgsError,
            _ => match err.category() {
                ErrorCategory::Io => ExitCode::IoError,
                _ => ExitCode::InternalError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
