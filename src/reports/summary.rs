//! Summary report generator for shell output.
//!
//! Provides a compact per-kind count table under the report header.

use super::{Report, ReportFormat, ReportGenerator};
use crate::error::Result;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color for a difference kind name.
fn kind_color(kind: &str) -> &'static str {
    if kind.ends_with("_ADDED") {
        "green"
    } else if kind.ends_with("_REMOVED") {
        "red"
    } else {
        "yellow"
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &Report) -> Result<String> {
        let mut lines: Vec<String> = report
            .header
            .iter()
            .map(|line| self.color(line, "bold"))
            .collect();

        if report.is_empty() {
            lines.push(self.color("No changes", "dim"));
        } else {
            let width = report
                .kind_counts
                .keys()
                .map(String::len)
                .max()
                .unwrap_or(0);
            for (kind, count) in &report.kind_counts {
                lines.push(format!(
                    "{}  {count:>5}",
                    self.color(&format!("{kind:<width$}"), kind_color(kind))
                ));
            }
            lines.push(self.color(&"─".repeat(width + 7), "dim"));
            lines.push(format!(
                "{:<width$}  {:>5}",
                "TOTAL", report.difference_count
            ));
        }

        if report.has_failures() {
            lines.push(String::new());
            lines.push(self.color(
                &format!("{} difference(s) could not be rendered:", report.failures.len()),
                "red",
            ));
            for failure in &report.failures {
                lines.push(format!("  {}: {}", failure.kind, failure.reason));
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
