//! Registered flow snapshot decoder.

use crate::error::{ErrorContext, FlowDiffError, LoadErrorKind, Result};
use crate::model::{FlowSnapshot, ParameterContext};
use indexmap::IndexMap;
use std::path::Path;

/// Maximum snapshot file size (256 MB).
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Loader for JSON flow snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    max_file_size: u64,
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_file_size: MAX_SNAPSHOT_FILE_SIZE,
        }
    }

    /// Override the file size limit.
    #[must_use]
    pub const fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Read and decode a snapshot file.
    pub fn load(&self, path: &Path) -> Result<FlowSnapshot> {
        let metadata = std::fs::metadata(path).map_err(|e| FlowDiffError::io(path, e))?;
        if metadata.len() > self.max_file_size {
            return Err(FlowDiffError::load(
                format!("reading {}", path.display()),
                LoadErrorKind::InvalidJson(format!(
                    "snapshot is {} MB, exceeding the {} MB limit",
                    metadata.len() / (1024 * 1024),
                    self.max_file_size / (1024 * 1024),
                )),
            ));
        }
        let content = std::fs::read_to_string(path).map_err(|e| FlowDiffError::io(path, e))?;
        self.parse_str(&content)
            .with_context(|| format!("decoding {}", path.display()))
    }

    /// Decode a snapshot from JSON text and normalize it.
    pub fn parse_str(&self, content: &str) -> Result<FlowSnapshot> {
        let mut snapshot: FlowSnapshot =
            serde_json::from_str(content).map_err(map_decode_error)?;
        normalize_parameter_contexts(&mut snapshot)?;
        Ok(snapshot)
    }
}

fn map_decode_error(err: serde_json::Error) -> FlowDiffError {
    let message = err.to_string();
    match message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        Some(field) => FlowDiffError::missing_field(
            field,
            format!("line {} column {}", err.line(), err.column()),
        ),
        None => FlowDiffError::from(err),
    }
}

/// Key every parameter context by its name and set its identifier to the
/// name. Contexts are matched by name from here on.
fn normalize_parameter_contexts(snapshot: &mut FlowSnapshot) -> Result<()> {
    let raw = std::mem::take(&mut snapshot.parameter_contexts);
    let mut normalized: IndexMap<String, ParameterContext> = IndexMap::with_capacity(raw.len());

    for (key, mut context) in raw {
        if context.name.is_empty() {
            context.name = key;
        }
        context.identifier = Some(context.name.clone());
        if normalized.contains_key(&context.name) {
            return Err(FlowDiffError::load(
                "normalizing parameter contexts",
                LoadErrorKind::DuplicateParameterContext(context.name),
            ));
        }
        normalized.insert(context.name.clone(), context);
    }

    tracing::debug!(
        contexts = normalized.len(),
        "Normalized parameter context identifiers"
    );
    snapshot.parameter_contexts = normalized;
    Ok(())
}
