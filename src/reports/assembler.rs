//! Report assembly: header, rendered blocks, failure bookkeeping.

use super::context_index::ParameterContextIndex;
use super::renderer::{DifferenceRenderer, LIST_MARKER};
use crate::diff::FlowDifference;
use crate::error::{FlowDiffError, RenderErrorKind};
use indexmap::IndexMap;
use serde::Serialize;

/// First header line of every report.
pub const REPORT_TITLE: &str = "## Flow Diff";

/// A difference that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFailure {
    /// Difference kind name, e.g. `PARAMETER_CONTEXT_CHANGED`
    pub kind: String,
    pub reason: String,
}

/// The assembled report for one comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub flow_name: String,
    pub header: Vec<String>,
    /// Rendered difference lines, in input order
    pub lines: Vec<String>,
    pub failures: Vec<RenderFailure>,
    /// Number of differences per kind name, in first-seen order
    pub kind_counts: IndexMap<String, usize>,
    pub difference_count: usize,
}

impl Report {
    /// Header followed by body lines.
    pub fn all_lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.lines.iter())
            .map(String::as_str)
    }

    /// Newline-joined report text, with a trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in self.all_lines() {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True when the comparison produced no differences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.difference_count == 0
    }
}

/// Builds a [`Report`] from a difference collection.
///
/// A difference that fails to render contributes one error line and one
/// [`RenderFailure`]; the rest of the report is unaffected.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'i, 'a> {
    renderer: DifferenceRenderer<'i, 'a>,
}

impl<'i, 'a> ReportAssembler<'i, 'a> {
    #[must_use]
    pub fn new(index: &'i ParameterContextIndex<'a>) -> Self {
        Self {
            renderer: DifferenceRenderer::new(index),
        }
    }

    pub fn assemble(&self, flow_name: &str, differences: &[FlowDifference<'_>]) -> Report {
        let mut lines = Vec::new();
        let mut failures = Vec::new();
        let mut kind_counts: IndexMap<String, usize> = IndexMap::new();

        for difference in differences {
            *kind_counts
                .entry(difference.kind.as_str().to_string())
                .or_default() += 1;

            match self.renderer.render(difference) {
                Ok(rendered) => lines.extend(rendered),
                Err(err) => {
                    let failure = RenderFailure {
                        kind: difference.kind.as_str().to_string(),
                        reason: failure_reason(err),
                    };
                    tracing::warn!(
                        kind = %failure.kind,
                        "Could not render difference: {}",
                        failure.reason
                    );
                    lines.push(format!(
                        "{LIST_MARKER}[render error] {}: {}",
                        failure.kind, failure.reason
                    ));
                    failures.push(failure);
                }
            }
        }

        tracing::debug!(
            differences = differences.len(),
            lines = lines.len(),
            failures = failures.len(),
            "Assembled report for {flow_name}"
        );

        Report {
            flow_name: flow_name.to_string(),
            header: header(flow_name),
            lines,
            failures,
            kind_counts,
            difference_count: differences.len(),
        }
    }
}

/// Assemble a report for `flow_name` in one call.
pub fn assemble(
    flow_name: &str,
    differences: &[FlowDifference<'_>],
    index: &ParameterContextIndex<'_>,
) -> Report {
    ReportAssembler::new(index).assemble(flow_name, differences)
}

/// The two header lines naming the flow.
#[must_use]
pub fn header(flow_name: &str) -> Vec<String> {
    vec![
        REPORT_TITLE.to_string(),
        format!("### Executing Flow Diff for flow: `{flow_name}`"),
    ]
}

fn failure_reason(err: FlowDiffError) -> String {
    match err {
        FlowDiffError::Render {
            source: RenderErrorKind::MalformedDifference { reason, .. },
            ..
        } => reason,
        other => other.to_string(),
    }
}
