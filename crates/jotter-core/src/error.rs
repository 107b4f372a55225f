//! Error types and exit codes for jotter
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, unknown note, etc.)
//!
//! Core store operations degrade silently (unknown ids are no-ops, malformed
//! blobs load as empty); these errors surface from the medium, configuration
//! and the CLI layer.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the jotter CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, unknown note (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during jotter operations
#[derive(Error, Debug)]
pub enum JotterError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    #[error("invalid storage key: {key:?}")]
    InvalidKey { key: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl JotterError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        JotterError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        JotterError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            JotterError::UnknownFormat(_)
            | JotterError::UsageError(_)
            | JotterError::InvalidValue { .. } => ExitCode::Usage,

            JotterError::StoreNotFound { .. }
            | JotterError::NoteNotFound { .. }
            | JotterError::InvalidKey { .. } => ExitCode::Data,

            JotterError::Io(_)
            | JotterError::Json(_)
            | JotterError::Toml(_)
            | JotterError::FailedOperationWithTarget { .. }
            | JotterError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            JotterError::UnknownFormat(_) => "unknown_format",
            JotterError::UsageError(_) => "usage_error",
            JotterError::InvalidValue { .. } => "invalid_value",
            JotterError::StoreNotFound { .. } => "store_not_found",
            JotterError::NoteNotFound { .. } => "note_not_found",
            JotterError::InvalidKey { .. } => "invalid_key",
            JotterError::Io(_) => "io_error",
            JotterError::Json(_) => "json_error",
            JotterError::Toml(_) => "toml_error",
            JotterError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            JotterError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for jotter operations
pub type Result<T> = std::result::Result<T, JotterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            JotterError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            JotterError::NoteNotFound { id: "x".into() }.exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            JotterError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
        assert_eq!(i32::from(ExitCode::Data), 3);
    }

    #[test]
    fn test_to_json_envelope() {
        let err = JotterError::NoteNotFound {
            id: "a1b2c3d4".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "note_not_found");
        assert_eq!(json["error"]["message"], "note not found: a1b2c3d4");
    }
}
