//! Application error types.
//!
//! Defines `AppError` for every failure the pipeline can surface. Nothing is
//! recovered inside the library; errors bubble to the caller, which decides
//! whether to exit or carry on.
//!
//! Error kinds:
//! - `ExternalTool` → the version-control provider failed, timed out or was cancelled
//! - `TimestampParse` → commit timestamp text did not match the expected format
//! - `RepoNotFound` → the repository path could not be opened

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{operation} failed: {reason}")]
    ExternalTool { operation: String, reason: String },

    #[error("Invalid commit timestamp {payload:?}: {source}")]
    TimestampParse {
        payload: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Repository not found: {0}")]
    RepoNotFound(String),
}

impl AppError {
    pub fn external(operation: impl Into<String>, reason: impl ToString) -> Self {
        AppError::ExternalTool {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_external_tool(&self) -> bool {
        matches!(self, AppError::ExternalTool { .. })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
