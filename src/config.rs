//! Configuration System
//!
//! Layered configuration for scanning and logging. Sources, lowest to highest
//! precedence: built-in defaults, the global config file (or an explicit
//! `--config` file in its place), then `FIM_*` environment variables.

use crate::logging::LoggingConfig;
use crate::tree::hasher::DEFAULT_CHUNK_SIZE;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FimConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Path component names skipped during traversal
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum traversal depth below the root (unset = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Hashing workers: 1 = sequential, 0 = one per core, N = N threads
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Read chunk size in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_jobs() -> usize {
    1
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            max_depth: None,
            jobs: default_jobs(),
            chunk_size: default_chunk_size(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Scan(msg) => write!(f, "scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.chunk_size == 0 {
            errors.push("chunk_size must be greater than zero".to_string());
        }
        if self.max_depth == Some(0) {
            errors.push("max_depth must be at least 1 when set".to_string());
        }
        for pattern in &self.ignore {
            if pattern.is_empty() || pattern.contains('/') || pattern.contains('\\') {
                errors.push(format!(
                    "ignore pattern {:?} must be a single path component",
                    pattern
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl FimConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(scan_errors) = self.scan.validate() {
            errors.extend(scan_errors.into_iter().map(ValidationError::Scan));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
