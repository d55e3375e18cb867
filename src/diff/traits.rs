//! Comparator abstraction.
//!
//! The renderer only ever sees [`FlowDifference`] records; anything that can
//! turn two flows into those records can stand behind [`FlowComparator`].

use super::FlowDifference;
use crate::error::Result;
use crate::model::{FlowSnapshot, ParameterContext, ProcessGroup};
use indexmap::IndexMap;

/// One side of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct ComparableFlow<'a> {
    /// Label used in log and error messages
    pub label: &'a str,
    pub contents: &'a ProcessGroup,
    /// Contexts keyed by name; identifiers are expected to equal names
    pub parameter_contexts: &'a IndexMap<String, ParameterContext>,
}

impl<'a> ComparableFlow<'a> {
    #[must_use]
    pub fn from_snapshot(label: &'a str, snapshot: &'a FlowSnapshot) -> Self {
        Self {
            label,
            contents: &snapshot.flow_contents,
            parameter_contexts: &snapshot.parameter_contexts,
        }
    }
}

/// How far the comparator descends into added or removed process groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparatorStrategy {
    /// Report only the added or removed group itself
    Shallow,
    /// Also report every component inside an added or removed group
    #[default]
    Deep,
}

/// Output of a comparison run.
#[derive(Debug, Clone, Default)]
pub struct FlowComparison<'a> {
    differences: Vec<FlowDifference<'a>>,
}

impl<'a> FlowComparison<'a> {
    #[must_use]
    pub fn new(differences: Vec<FlowDifference<'a>>) -> Self {
        Self { differences }
    }

    #[must_use]
    pub fn differences(&self) -> &[FlowDifference<'a>] {
        &self.differences
    }

    #[must_use]
    pub fn into_differences(self) -> Vec<FlowDifference<'a>> {
        self.differences
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.differences.len()
    }
}

/// Computes the set of differences between two flows.
pub trait FlowComparator {
    /// Compare flow A (before) with flow B (after).
    fn compare<'a>(
        &self,
        flow_a: &ComparableFlow<'a>,
        flow_b: &ComparableFlow<'a>,
    ) -> Result<FlowComparison<'a>>;

    /// Name of this comparator for logging.
    fn name(&self) -> &str;
}
