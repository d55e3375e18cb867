//! Typed representation of versioned flow snapshots.
//!
//! A [`FlowSnapshot`] is the decoded form of one registered flow version:
//! a tree of process groups holding processors, controller services,
//! connections and the other canvas components, plus the parameter contexts
//! those components may reference. [`Component`] gives a uniform borrowed
//! view over every component variant for the comparator and the renderer.

mod component;
mod parameters;
mod snapshot;

pub use component::*;
pub use parameters::*;
pub use snapshot::*;
