//! CLI domain: parse, route, output, and presentation only.
//! Scanning, persistence, and diffing live in the library modules; the CLI
//! wires them together and renders their results.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_baseline_summary, format_check_json, format_check_text, Palette,
};
pub use route::RunContext;
