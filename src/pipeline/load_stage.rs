//! Snapshot loading stage.

use super::PipelineError;
use crate::model::FlowSnapshot;
use anyhow::Result;
use std::path::Path;

/// Load a flow snapshot, naming the file in any failure.
pub fn load_snapshot_with_context(path: &Path, quiet: bool) -> Result<FlowSnapshot> {
    if !quiet {
        tracing::info!("Loading flow snapshot: {:?}", path);
    }

    let snapshot = crate::parsers::load_snapshot(path).map_err(|e| PipelineError::LoadFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            "Loaded flow `{}` with {} components and {} parameter contexts",
            snapshot.flow_name(),
            snapshot.component_count(),
            snapshot.parameter_contexts.len()
        );
    }

    Ok(snapshot)
}
