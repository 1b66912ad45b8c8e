//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("document violates {0} structural rule(s)")]
    CheckFailed(usize),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Io(_) => exitcode::NOINPUT,
            CliError::Json(_) | CliError::CheckFailed(_) => exitcode::DATAERR,
            CliError::Domain(_) => exitcode::DATAERR,
        }
    }
}
