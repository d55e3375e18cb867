//! Diff command handler.
//!
//! Implements the default command: compare two flow snapshots and write the
//! change report.

use crate::config::{DiffConfig, Validatable};
use crate::error::FlowDiffError;
use crate::pipeline::{
    assemble_report, compute_differences, exit_codes, load_snapshot_with_context, output_report,
    PipelineError,
};
use crate::reports::Report;
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FlowDiffError::validation(message).into());
    }

    let quiet = config.behavior.quiet;
    let before = load_snapshot_with_context(&config.paths.before, quiet)?;
    let after = load_snapshot_with_context(&config.paths.after, quiet)?;

    let differences = compute_differences(&config, &before, &after)?;
    let report = assemble_report(&before, &after, &differences);
    output_report(&config, &report)?;

    Ok(determine_exit_code(&config, &report))
}

/// Render failures outrank detected changes.
fn determine_exit_code(config: &DiffConfig, report: &Report) -> i32 {
    if report.has_failures() {
        tracing::error!(
            "{}",
            PipelineError::RenderFailed {
                failures: report.failures.len()
            }
        );
        return exit_codes::RENDER_FAILURES;
    }
    if config.behavior.fail_on_change && !report.is_empty() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::reports::{header, RenderFailure};

    fn report(difference_count: usize, failures: Vec<RenderFailure>) -> Report {
        Report {
            flow_name: "Ingest".to_string(),
            header: header("Ingest"),
            lines: Vec::new(),
            failures,
            kind_counts: indexmap::IndexMap::new(),
            difference_count,
        }
    }

    fn config(fail_on_change: bool) -> DiffConfig {
        AppConfig::builder()
            .fail_on_change(fail_on_change)
            .build()
            .into_diff_config("a.json".into(), "b.json".into())
    }

    #[test]
    fn test_exit_code_for_changes() {
        assert_eq!(
            determine_exit_code(&config(false), &report(3, Vec::new())),
            exit_codes::SUCCESS
        );
        assert_eq!(
            determine_exit_code(&config(true), &report(3, Vec::new())),
            exit_codes::CHANGES_DETECTED
        );
        assert_eq!(
            determine_exit_code(&config(true), &report(0, Vec::new())),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_render_failures_take_precedence() {
        let failure = RenderFailure {
            kind: "PARAMETER_VALUE_CHANGED".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(
            determine_exit_code(&config(true), &report(1, vec![failure])),
            exit_codes::RENDER_FAILURES
        );
    }

    #[test]
    fn test_missing_snapshot_is_validation_error() {
        let err = run_diff(config(false)).unwrap_err();
        let err = err.downcast_ref::<FlowDiffError>().unwrap();
        assert!(matches!(err, FlowDiffError::Validation(_)));
    }
}
