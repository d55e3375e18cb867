//! Report generation for flow differences.
//!
//! The rendering core lives here:
//! - [`SensitivityResolver`]: decides whether a property or parameter value
//!   may be printed
//! - [`ParameterContextIndex`]: name-keyed lookup of the compared flow's
//!   parameter contexts
//! - [`DifferenceRenderer`]: one difference record in, report lines out
//! - [`ReportAssembler`]: header plus every rendered block
//!
//! Output formats sit on top of an assembled [`Report`]:
//! - Markdown: the report lines as-is
//! - Summary: compact per-kind counts for the shell
//!
//! # Example
//!
//! ```ignore
//! use flow_diff::reports::{create_reporter, ParameterContextIndex, ReportAssembler, ReportFormat};
//!
//! let index = ParameterContextIndex::build(&after.parameter_contexts);
//! let report = ReportAssembler::new(&index).assemble(before.flow_name(), &differences);
//! let text = create_reporter(ReportFormat::Markdown).generate(&report)?;
//! ```

mod assembler;
mod context_index;
mod markdown;
mod renderer;
pub mod sensitivity;
mod summary;
mod types;

pub use assembler::{assemble, header, RenderFailure, Report, ReportAssembler, REPORT_TITLE};
pub use context_index::ParameterContextIndex;
pub use markdown::MarkdownReporter;
pub use renderer::{DifferenceRenderer, LIST_MARKER, NESTED_MARKER, NONE_MARKER};
pub use sensitivity::{
    PropertyOwner, RenderableValue, SensitivityResolver, NO_VALUE, SENSITIVE_PLACEHOLDER,
};
pub use summary::SummaryReporter;
pub use types::ReportFormat;

use crate::error::Result;
use std::io::Write;

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate the formatted output for an assembled report
    fn generate(&self, report: &Report) -> Result<String>;

    /// Write the formatted report to a writer
    fn write_report(&self, report: &Report, writer: &mut dyn Write) -> Result<()> {
        let text = self.generate(report)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_returns_requested_format() {
        for format in [ReportFormat::Markdown, ReportFormat::Summary] {
            assert_eq!(create_reporter(format).format(), format);
            assert_eq!(create_reporter_with_options(format, false).format(), format);
        }
    }

    #[test]
    fn test_write_report_writes_generated_text() {
        let report = ReportAssembler::new(&ParameterContextIndex::empty()).assemble("Ingest", &[]);
        let mut buffer = Vec::new();
        MarkdownReporter::new()
            .write_report(&report, &mut buffer)
            .expect("write");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), report.to_text());
    }
}
