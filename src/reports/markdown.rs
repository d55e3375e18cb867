//! Markdown report: the assembled report text as-is.

use super::{Report, ReportFormat, ReportGenerator};
use crate::error::Result;

/// Writes the header and every rendered line, one per row.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, report: &Report) -> Result<String> {
        Ok(report.to_text())
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
