//! Pipeline orchestration for flow diff runs.
//!
//! This module provides the load → compare → render → write workflow used by
//! the CLI command handlers.

mod compare_stage;
mod load_stage;
mod output;
mod report_stage;

pub use compare_stage::compute_differences;
pub use load_stage::load_snapshot_with_context;
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{assemble_report, output_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or decode a flow snapshot
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The comparator could not reconcile the two flows
    #[error("Comparison failed: {source}")]
    CompareFailed {
        #[source]
        source: anyhow::Error,
    },

    /// One or more differences could not be rendered
    #[error("{failures} difference(s) could not be rendered")]
    RenderFailed { failures: usize },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected, or changes without --fail-on-change
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and --fail-on-change is set
    pub const CHANGES_DETECTED: i32 = 1;
    /// The report was written but some differences could not be rendered
    pub const RENDER_FAILURES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
