//! Error types for the file integrity monitor.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a single file while hashing it.
///
/// Absorbed by the scanner: the file is left out of the mapping and the
/// failure is reported as a diagnostic.
#[derive(Debug, Error)]
#[error("Failed to read file {path:?}: {source}")]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ReadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Scan-level errors; each aborts the scan invocation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan root does not exist: {0:?}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Failed to traverse {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Baseline persistence errors
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("Failed to write baseline {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load baseline {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl BaselineError {
    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BaselineError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Baseline(#[from] BaselineError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
