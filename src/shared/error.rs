use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers to distinguish between a clean pass,
/// a pass that finished with per-item problems, and a pass that failed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every artifact identified / every event reconciled
    Success = 0,
    /// The run completed but some items were skipped, failed, or abandoned at the deadline
    FailuresReported = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, I/O, unknown event kind, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::FailuresReported => write!(f, "Failures Reported (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-level errors raised outside the inspection core.
///
/// Domain failures (extraction, fetch, reconciliation) have their own enums in
/// `inspection::domain::errors`; these cover the shell around them.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to parse {description}: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains valid JSON in the expected shape")]
    InputParseError {
        path: PathBuf,
        description: String,
        details: String,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Intelligence service is not configured: {details}\n\n💡 Hint: Add a 'blackduck' section with 'url' to the config file, or pass --blackduck-url")]
    ServiceNotConfigured { details: String },

    /// Validation error for builder patterns and parsed inputs
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
