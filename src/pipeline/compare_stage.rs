//! Comparison stage.
//!
//! Runs the comparator over two loaded snapshots and applies the configured
//! ordering to its output.

use super::PipelineError;
use crate::config::DiffConfig;
use crate::diff::{
    sort_differences, ComparableFlow, ComparatorStrategy, FlowComparator, FlowDifference,
    StandardFlowComparator,
};
use crate::model::FlowSnapshot;
use anyhow::Result;

/// Compare `before` with `after` using the deep strategy.
pub fn compute_differences<'a>(
    config: &DiffConfig,
    before: &'a FlowSnapshot,
    after: &'a FlowSnapshot,
) -> Result<Vec<FlowDifference<'a>>> {
    let quiet = config.behavior.quiet;
    if !quiet {
        tracing::info!("Comparing flow snapshots...");
    }

    let comparator = StandardFlowComparator::new().with_strategy(ComparatorStrategy::Deep);
    let flow_a = ComparableFlow::from_snapshot("before", before);
    let flow_b = ComparableFlow::from_snapshot("after", after);
    let mut differences = comparator
        .compare(&flow_a, &flow_b)
        .map_err(|e| PipelineError::CompareFailed { source: e.into() })?
        .into_differences();

    if config.report.sort_differences {
        sort_differences(&mut differences);
    }

    if !quiet {
        tracing::info!(
            "Comparison complete: {} differences ({} comparator)",
            differences.len(),
            comparator.name()
        );
    }

    Ok(differences)
}
