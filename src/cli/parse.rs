//! CLI parse: clap types for fim. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fim - File integrity monitoring against a recorded baseline
#[derive(Parser)]
#[command(name = "fim")]
#[command(about = "Record a baseline of a directory tree and detect changes against it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (used instead of the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored report output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fingerprint every file under DIRECTORY and save the baseline
    Baseline {
        /// Directory to fingerprint
        directory: PathBuf,
        /// Where to write the baseline file
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Scan DIRECTORY and report changes against a saved baseline
    Check {
        /// Directory to check
        directory: PathBuf,
        /// Baseline file to compare against
        #[arg(long = "with", short = 'w', value_name = "BASELINE")]
        baseline: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}
