//! Report stage.
//!
//! Builds the parameter context index from the compared flow, assembles the
//! report and writes it in the configured format.

use super::{should_use_color, write_output, OutputTarget};
use crate::config::DiffConfig;
use crate::diff::FlowDifference;
use crate::model::FlowSnapshot;
use crate::reports::{create_reporter_with_options, ParameterContextIndex, Report, ReportAssembler};
use anyhow::{Context, Result};

/// Assemble the report for a comparison.
///
/// The header names the flow as recorded in `before`; parameter contexts are
/// looked up in `after`.
#[must_use]
pub fn assemble_report(
    before: &FlowSnapshot,
    after: &FlowSnapshot,
    differences: &[FlowDifference<'_>],
) -> Report {
    let index = ParameterContextIndex::build(&after.parameter_contexts);
    ReportAssembler::new(&index).assemble(before.flow_name(), differences)
}

/// Output an assembled report to the configured destination.
pub fn output_report(config: &DiffConfig, report: &Report) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();
    let reporter = create_reporter_with_options(config.output.format, use_color);

    let text = reporter
        .generate(report)
        .with_context(|| format!("Failed to generate {} report", reporter.format()))?;

    write_output(&text, &output_target, config.behavior.quiet)
}
