//! Error types for the linter module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for linter operations.
pub type LintResult<T> = Result<T, LintError>;

/// Errors that can occur while invoking the linting engine.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Linter not available: {0}")]
    LinterNotAvailable(String),

    #[error("Linter execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Linter timeout after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
