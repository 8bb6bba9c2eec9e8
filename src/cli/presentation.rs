//! CLI presentation: text and json formatters for baseline and check results.
//!
//! Color is decided by the caller and handed in through [`Palette`]; nothing
//! here consults global terminal state.

use crate::diff::ClassificationResult;
use crate::tree::scanner::{ScanReport, SkippedFile};
use owo_colors::{OwoColorize, Style};
use serde_json::json;
use std::path::Path;

/// Styles used by the text report
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    heading: Style,
    new: Style,
    deleted: Style,
    modified: Style,
    clean: Style,
    warning: Style,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if color {
            Self {
                heading: Style::new().blue().bold(),
                new: Style::new().green(),
                deleted: Style::new().red(),
                modified: Style::new().yellow(),
                clean: Style::new().green().bold(),
                warning: Style::new().magenta(),
            }
        } else {
            Self::plain()
        }
    }

    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            new: Style::new(),
            deleted: Style::new(),
            modified: Style::new(),
            clean: Style::new(),
            warning: Style::new(),
        }
    }
}

pub fn format_baseline_summary(report: &ScanReport, destination: &Path, palette: Palette) -> String {
    let mut output = format!(
        "Baseline saved to {}\n  Root: {}\n  Files: {}",
        destination.display(),
        report.root.display(),
        report.fingerprints.len()
    );
    push_skipped(&mut output, &report.skipped, palette);
    output
}

pub fn format_check_text(
    result: &ClassificationResult,
    skipped: &[SkippedFile],
    palette: Palette,
) -> String {
    let mut output = format!("{}", "=== CHECK RESULTS ===".style(palette.heading));

    if result.is_clean() {
        output.push_str(&format!("\n{}", "No changes detected.".style(palette.clean)));
    } else {
        let sections = [
            ("New files:", "+", &result.new, palette.new),
            ("Deleted files:", "-", &result.deleted, palette.deleted),
            ("Modified files:", "!", &result.modified, palette.modified),
        ];
        for (title, marker, paths, style) in sections {
            if paths.is_empty() {
                continue;
            }
            output.push_str(&format!("\n\n{}", title.style(style)));
            for path in paths {
                output.push_str(&format!("\n  {} {}", marker.style(style), path));
            }
        }
    }

    output.push_str(&format!(
        "\n\nSummary: {} new, {} deleted, {} modified, {} unchanged",
        result.new.len(),
        result.deleted.len(),
        result.modified.len(),
        result.unchanged
    ));
    push_skipped(&mut output, skipped, palette);
    output
}

pub fn format_check_json(result: &ClassificationResult, skipped: &[SkippedFile]) -> String {
    let out = json!({
        "new": result.new,
        "deleted": result.deleted,
        "modified": result.modified,
        "unchanged": result.unchanged,
        "skipped": skipped
            .iter()
            .map(|s| json!({ "path": s.key, "reason": s.reason }))
            .collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

fn push_skipped(output: &mut String, skipped: &[SkippedFile], palette: Palette) {
    if skipped.is_empty() {
        return;
    }
    let title = format!("Warning: {} file(s) could not be read:", skipped.len());
    output.push_str(&format!("\n\n{}", title.style(palette.warning)));
    for file in skipped {
        output.push_str(&format!("\n  ? {} ({})", file.key, file.reason));
    }
}
