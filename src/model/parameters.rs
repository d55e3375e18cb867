//! Parameter contexts and parameters.

use serde::{Deserialize, Serialize};

/// A named set of parameters that component properties may reference.
///
/// The serialized form carries no stable identifier, so the loader sets
/// `identifier` to `name`; after loading, identity is the name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterContext {
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub inherited_parameter_contexts: Vec<String>,
}

impl ParameterContext {
    /// Find a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Identifier after normalization, falling back to the name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.name)
    }
}

/// A single parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub provided: bool,
}

impl Parameter {
    /// Create a plain parameter.
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
            ..Self::default()
        }
    }

    /// Create a sensitive parameter.
    pub fn sensitive(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            sensitive: true,
            ..Self::new(name, value)
        }
    }
}
