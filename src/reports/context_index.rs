//! Name-keyed lookup over one side's parameter contexts.

use crate::model::ParameterContext;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Parameter contexts of one flow side, keyed by name.
///
/// Built once per run, normally from the "after" side. Context identity is
/// the name; the loader guarantees names are unique and identifiers equal
/// names, so the index keys on the normalized identifier.
#[derive(Debug, Clone, Default)]
pub struct ParameterContextIndex<'a> {
    contexts: HashMap<&'a str, &'a ParameterContext>,
}

impl<'a> ParameterContextIndex<'a> {
    #[must_use]
    pub fn build(contexts: &'a IndexMap<String, ParameterContext>) -> Self {
        let contexts = contexts
            .values()
            .map(|context| (context.id(), context))
            .collect();
        Self { contexts }
    }

    /// An index with no contexts.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a context by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a ParameterContext> {
        self.contexts.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
