//! fim CLI Binary
//!
//! Command-line interface for recording and checking file integrity baselines.

use clap::Parser;
use fim::cli::{Cli, RunContext};
use fim::config::ConfigLoader;
use fim::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("fim starting");

    let context = match RunContext::new(cli.config.clone(), use_color(&cli, &logging_config)) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", fim::cli::map_error(&e));
            process::exit(1);
        }
    };

    // Finding changes is a normal outcome; only failures exit non-zero
    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", fim::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load_optional(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if cli.quiet {
        config.level = "off".to_string();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }
    if cli.no_color {
        config.color = false;
    }

    config
}

/// Colored reports only on a terminal, and never when NO_COLOR or `logging.color = false` is set
fn use_color(cli: &Cli, logging: &LoggingConfig) -> bool {
    !cli.no_color
        && logging.color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}
