//! Sensitivity resolution for property and parameter values.
//!
//! Processors and controller services declare sensitivity per property in a
//! descriptor table; parameters carry their own flag. Both are reached
//! through [`PropertyOwner`], so the renderer asks one question regardless
//! of where the answer lives.

use crate::error::RenderErrorKind;
use crate::model::{ComponentType, ControllerService, Parameter, ParameterContext, Processor};
use std::fmt;

/// Placeholder written in place of any sensitive value.
pub const SENSITIVE_PLACEHOLDER: &str = "<Sensitive Value>";

/// Marker for a property or parameter that exists but has no value.
pub const NO_VALUE: &str = "<no value>";

/// Anything that holds keyed values with per-key sensitivity.
pub trait PropertyOwner {
    fn owner_kind(&self) -> ComponentType;

    fn owner_id(&self) -> &str;

    /// `None` when the key has no entry at all; `Some(None)` when the entry
    /// exists without a value.
    fn stored_value(&self, key: &str) -> Option<Option<&str>>;

    /// `None` when no descriptor covers the key.
    fn sensitivity(&self, key: &str) -> Option<bool>;
}

impl PropertyOwner for Processor {
    fn owner_kind(&self) -> ComponentType {
        ComponentType::Processor
    }

    fn owner_id(&self) -> &str {
        &self.identifier
    }

    fn stored_value(&self, key: &str) -> Option<Option<&str>> {
        self.properties.get(key).map(Option::as_deref)
    }

    fn sensitivity(&self, key: &str) -> Option<bool> {
        self.property_descriptors.get(key).map(|d| d.sensitive)
    }
}

impl PropertyOwner for ControllerService {
    fn owner_kind(&self) -> ComponentType {
        ComponentType::ControllerService
    }

    fn owner_id(&self) -> &str {
        &self.identifier
    }

    fn stored_value(&self, key: &str) -> Option<Option<&str>> {
        self.properties.get(key).map(Option::as_deref)
    }

    fn sensitivity(&self, key: &str) -> Option<bool> {
        self.property_descriptors.get(key).map(|d| d.sensitive)
    }
}

impl PropertyOwner for ParameterContext {
    fn owner_kind(&self) -> ComponentType {
        ComponentType::ParameterContext
    }

    fn owner_id(&self) -> &str {
        self.id()
    }

    fn stored_value(&self, key: &str) -> Option<Option<&str>> {
        self.parameter(key).map(|p| p.value.as_deref())
    }

    fn sensitivity(&self, key: &str) -> Option<bool> {
        self.parameter(key).map(|p| p.sensitive)
    }
}

/// A value that is safe to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableValue<'a> {
    Sensitive,
    Value(&'a str),
    NoValue,
}

impl fmt::Display for RenderableValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensitive => f.write_str(SENSITIVE_PLACEHOLDER),
            Self::Value(value) => f.write_str(value),
            Self::NoValue => f.write_str(NO_VALUE),
        }
    }
}

/// Decides whether a stored value may be shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivityResolver;

impl SensitivityResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Unknown sensitivity counts as not sensitive.
    #[must_use]
    pub fn is_sensitive(&self, owner: &dyn PropertyOwner, key: &str) -> bool {
        owner.sensitivity(key).unwrap_or(false)
    }

    /// Resolve the printable form of `owner[key]`.
    ///
    /// Fails with [`RenderErrorKind::MissingField`] when the key has neither
    /// a descriptor nor a value entry.
    pub fn resolve<'o>(
        &self,
        owner: &'o dyn PropertyOwner,
        key: &str,
    ) -> Result<RenderableValue<'o>, RenderErrorKind> {
        match (owner.sensitivity(key), owner.stored_value(key)) {
            (None, None) => Err(RenderErrorKind::MissingField {
                field: key.to_string(),
                owner: format!("{} {}", owner.owner_kind(), owner.owner_id()),
            }),
            (Some(true), _) => Ok(RenderableValue::Sensitive),
            (_, Some(Some(value))) => Ok(RenderableValue::Value(value)),
            (_, _) => Ok(RenderableValue::NoValue),
        }
    }

    /// Resolve a parameter directly from its own flag.
    #[must_use]
    pub fn resolve_parameter<'p>(&self, parameter: &'p Parameter) -> RenderableValue<'p> {
        if parameter.sensitive {
            RenderableValue::Sensitive
        } else {
            parameter
                .value
                .as_deref()
                .map_or(RenderableValue::NoValue, RenderableValue::Value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyDescriptor;

    fn processor() -> Processor {
        let mut processor = Processor {
            identifier: "p1".to_string(),
            ..Default::default()
        };
        processor
            .properties
            .insert("Password".to_string(), Some("hunter2".to_string()));
        processor
            .properties
            .insert("Hostname".to_string(), Some("db.internal".to_string()));
        processor.properties.insert("Proxy".to_string(), None);
        processor.property_descriptors.insert(
            "Password".to_string(),
            PropertyDescriptor {
                name: "Password".to_string(),
                sensitive: true,
                ..Default::default()
            },
        );
        processor.property_descriptors.insert(
            "Timeout".to_string(),
            PropertyDescriptor {
                name: "Timeout".to_string(),
                ..Default::default()
            },
        );
        processor
    }

    #[test]
    fn test_sensitive_property_is_redacted() {
        let processor = processor();
        let resolver = SensitivityResolver::new();
        let value = resolver.resolve(&processor, "Password").expect("resolve");
        assert_eq!(value, RenderableValue::Sensitive);
        assert_eq!(value.to_string(), SENSITIVE_PLACEHOLDER);
    }

    #[test]
    fn test_missing_descriptor_treated_as_plain() {
        let processor = processor();
        let resolver = SensitivityResolver::new();
        assert_eq!(
            resolver.resolve(&processor, "Hostname"),
            Ok(RenderableValue::Value("db.internal"))
        );
        assert!(!resolver.is_sensitive(&processor, "Hostname"));
    }

    #[test]
    fn test_absent_value_renders_marker() {
        let processor = processor();
        let resolver = SensitivityResolver::new();
        assert_eq!(
            resolver.resolve(&processor, "Proxy"),
            Ok(RenderableValue::NoValue)
        );
        // descriptor without a value entry
        assert_eq!(
            resolver.resolve(&processor, "Timeout"),
            Ok(RenderableValue::NoValue)
        );
    }

    #[test]
    fn test_unknown_key_is_missing_field() {
        let processor = processor();
        let err = SensitivityResolver::new()
            .resolve(&processor, "Nope")
            .unwrap_err();
        assert_eq!(
            err,
            RenderErrorKind::MissingField {
                field: "Nope".to_string(),
                owner: "Processor p1".to_string(),
            }
        );
    }

    #[test]
    fn test_parameter_flag_drives_redaction() {
        let resolver = SensitivityResolver::new();
        let secret = Parameter::sensitive("token", Some("abc123"));
        let plain = Parameter::new("region", Some("eu-west-1"));
        let unset = Parameter::new("empty", None);

        assert_eq!(resolver.resolve_parameter(&secret), RenderableValue::Sensitive);
        assert_eq!(
            resolver.resolve_parameter(&plain),
            RenderableValue::Value("eu-west-1")
        );
        assert_eq!(resolver.resolve_parameter(&unset), RenderableValue::NoValue);

        let context = ParameterContext {
            name: "Cloud".to_string(),
            parameters: vec![secret, plain],
            ..Default::default()
        };
        assert_eq!(
            resolver.resolve(&context, "token"),
            Ok(RenderableValue::Sensitive)
        );
    }
}
