//! **Human-readable, redaction-aware change reports for versioned dataflows.**
//!
//! `flow-diff` compares two registered snapshots of a dataflow (a process
//! group tree of processors, controller services, connections, ports and
//! parameter contexts) and turns the semantic differences into a Markdown
//! bullet list that can be pasted into a pull request.
//!
//! Sensitive property and parameter values never reach the output: every
//! value passes through the [`SensitivityResolver`] and is replaced by
//! `<Sensitive Value>` when either side of the change marks it sensitive.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the flow snapshot data model.
//! - **[`parsers`]**: loads snapshot JSON and normalizes parameter-context
//!   identity to the context name.
//! - **[`diff`]**: typed [`FlowDifference`] records and the
//!   [`StandardFlowComparator`] that produces them.
//! - **[`reports`]**: the sensitivity resolver, parameter context index,
//!   difference renderer and report assembler, plus output formats.
//! - **[`pipeline`]**: load → compare → render → write orchestration.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use flow_diff::{load_snapshot, ComparableFlow, FlowComparator, StandardFlowComparator};
//! use flow_diff::reports::{ParameterContextIndex, ReportAssembler};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let before = load_snapshot(Path::new("flow-v1.json"))?;
//!     let after = load_snapshot(Path::new("flow-v2.json"))?;
//!
//!     let comparison = StandardFlowComparator::new().compare(
//!         &ComparableFlow::from_snapshot("before", &before),
//!         &ComparableFlow::from_snapshot("after", &after),
//!     )?;
//!
//!     let index = ParameterContextIndex::build(&after.parameter_contexts);
//!     let report = ReportAssembler::new(&index)
//!         .assemble(before.flow_name(), comparison.differences());
//!     print!("{}", report.to_text());
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::similar_names)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ReportOptions};
pub use config::{ConfigError, DiffConfig, Validatable};
pub use diff::{
    ComparableFlow, ComparatorStrategy, DiffValue, DifferenceType, FlowComparator,
    FlowComparison, FlowDifference, StandardFlowComparator,
};
pub use error::{ErrorContext, FlowDiffError, Result};
pub use model::{Component, ComponentType, FlowSnapshot, Parameter, ParameterContext};
pub use parsers::{load_snapshot, parse_snapshot_str, SnapshotLoader};
pub use reports::{
    DifferenceRenderer, ParameterContextIndex, Report, ReportAssembler, ReportFormat,
    ReportGenerator, SensitivityResolver,
};
