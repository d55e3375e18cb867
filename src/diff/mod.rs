//! Difference records and the flow comparator.
//!
//! A comparison turns two versions of a flow into a collection of typed
//! [`FlowDifference`] records. Rendering never depends on how those records
//! were produced; it only needs the records themselves.
//!
//! # Architecture
//!
//! - [`FlowComparator`](traits::FlowComparator): trait for anything that
//!   produces differences from two [`ComparableFlow`]s
//! - [`StandardFlowComparator`]: matches components by identifier, walking
//!   both process-group trees in lockstep
//! - [`changes`]: per-component-family field comparisons
//!
//! # Example
//!
//! ```ignore
//! use flow_diff::diff::{ComparableFlow, FlowComparator, StandardFlowComparator};
//!
//! let before = ComparableFlow::from_snapshot("before", &snapshot_a);
//! let after = ComparableFlow::from_snapshot("after", &snapshot_b);
//! let comparison = StandardFlowComparator::new().compare(&before, &after)?;
//! for difference in comparison.differences() {
//!     println!("{}: {}", difference.kind, difference.description);
//! }
//! ```

pub mod changes;
mod engine;
pub mod traits;
mod types;

pub use changes::references_parameter;
pub use engine::StandardFlowComparator;
pub use traits::{ComparableFlow, ComparatorStrategy, FlowComparator, FlowComparison};
pub use types::{sort_differences, DiffValue, DifferenceType, FlowDifference};
