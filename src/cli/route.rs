//! CLI route: run context and command dispatch. Calls into the scanner,
//! baseline store, and differ, then hands results to presentation.

use crate::baseline;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_baseline_summary, format_check_json, format_check_text, Palette,
};
use crate::config::{ConfigLoader, FimConfig};
use crate::diff;
use crate::error::ApiError;
use crate::tree::scanner::Scanner;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: validated configuration and report styling.
pub struct RunContext {
    config: FimConfig,
    palette: Palette,
}

impl RunContext {
    /// Load and validate configuration from the explicit path or the default sources.
    pub fn new(config_path: Option<PathBuf>, color: bool) -> Result<Self, ApiError> {
        let config = ConfigLoader::load_optional(config_path.as_deref())?;
        Self::with_config(config, color)
    }

    pub fn with_config(config: FimConfig, color: bool) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(Self {
            config,
            palette: Palette::new(color),
        })
    }

    pub fn config(&self) -> &FimConfig {
        &self.config
    }

    /// Execute a command and return the report to print on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Baseline { directory, output } => self.create_baseline(directory, output),
            Commands::Check {
                directory,
                baseline,
                format,
            } => self.check(directory, baseline, format),
        }
    }

    fn scanner(&self, directory: &Path, baseline_path: &Path) -> Scanner {
        Scanner::from_config(directory, &self.config.scan).exclude_file(baseline_path)
    }

    fn create_baseline(&self, directory: &Path, output: &Path) -> Result<String, ApiError> {
        info!(directory = %directory.display(), output = %output.display(), "Creating baseline");
        let report = self.scanner(directory, output).scan_report()?;
        baseline::save(&report.fingerprints, output)?;
        Ok(format_baseline_summary(&report, output, self.palette))
    }

    fn check(&self, directory: &Path, baseline_path: &Path, format: &str) -> Result<String, ApiError> {
        info!(directory = %directory.display(), baseline = %baseline_path.display(), "Checking directory");
        let stored = baseline::load(baseline_path)?;
        let report = self.scanner(directory, baseline_path).scan_report()?;
        let result = diff::diff(&report.fingerprints, &stored);

        info!(
            new = result.new.len(),
            deleted = result.deleted.len(),
            modified = result.modified.len(),
            unchanged = result.unchanged,
            "Check completed"
        );

        Ok(match format {
            "json" => format_check_json(&result, &report.skipped),
            _ => format_check_text(&result, &report.skipped, self.palette),
        })
    }
}
