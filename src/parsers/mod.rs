//! Flow snapshot loader.
//!
//! Decodes registered flow snapshots from JSON into [`FlowSnapshot`] and
//! applies the one load-time normalization the rest of the crate relies on:
//! every parameter context is identified by its name.
//!
//! ## Usage
//!
//! ```no_run
//! use flow_diff::parsers::load_snapshot;
//! use std::path::Path;
//!
//! let snapshot = load_snapshot(Path::new("flow-v2.json")).unwrap();
//! println!("{}: {} components", snapshot.flow_name(), snapshot.component_count());
//! ```

mod snapshot;

pub use snapshot::{SnapshotLoader, MAX_SNAPSHOT_FILE_SIZE};

use crate::error::Result;
use crate::model::FlowSnapshot;
use std::path::Path;

/// Read, decode and normalize a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<FlowSnapshot> {
    SnapshotLoader::new().load(path)
}

/// Decode and normalize a snapshot from JSON text.
pub fn parse_snapshot_str(content: &str) -> Result<FlowSnapshot> {
    SnapshotLoader::new().parse_str(content)
}
