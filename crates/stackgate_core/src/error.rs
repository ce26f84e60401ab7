//! Error types for stackgate core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while loading and validating configurations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Template substitution failed: {0}")]
    Substitution(String),

    #[error("Config load error: {0}")]
    ConfigLoad(#[source] Box<CoreError>),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid variables: {0}")]
    InvalidVariables(String),

    #[error("Invalid template parameters in {}: {message}", .path.display())]
    Schema { path: PathBuf, message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    /// Wrap an error raised while loading a configuration file.
    pub(crate) fn config_load(cause: CoreError) -> Self {
        match cause {
            already @ Self::ConfigLoad(_) => already,
            other => Self::ConfigLoad(Box::new(other)),
        }
    }
}
