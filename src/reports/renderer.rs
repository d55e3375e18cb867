//! Difference renderer: one difference record in, one block of report
//! lines out.
//!
//! Dispatch is a total match over [`DifferenceType`]. Every kind with a
//! dedicated sentence has its own arm; everything else, including kinds this
//! build does not model, goes through the single fallback arm, which dumps
//! the raw record and never fails.
//!
//! Values never reach the output without passing the
//! [`SensitivityResolver`]: property values are re-read from the component
//! and redacted when either side marks the key sensitive, and parameter
//! values are redacted from the parameter's own flag.

use super::context_index::ParameterContextIndex;
use super::sensitivity::{PropertyOwner, SensitivityResolver, NO_VALUE, SENSITIVE_PLACEHOLDER};
use crate::diff::{DiffValue, DifferenceType, FlowDifference};
use crate::error::{FlowDiffError, Result};
use crate::model::{Component, ComponentType, Connection, Parameter, ParameterContext};

/// Prefix of every top-level report line.
pub const LIST_MARKER: &str = "- ";

/// Prefix of nested detail lines.
pub const NESTED_MARKER: &str = "  - ";

/// Shown in the fallback dump for an absent component, value or field.
pub const NONE_MARKER: &str = "<none>";

/// Stateless renderer over a read-only context index.
#[derive(Debug, Clone, Copy)]
pub struct DifferenceRenderer<'i, 'a> {
    index: &'i ParameterContextIndex<'a>,
    resolver: SensitivityResolver,
}

impl<'i, 'a> DifferenceRenderer<'i, 'a> {
    #[must_use]
    pub fn new(index: &'i ParameterContextIndex<'a>) -> Self {
        Self {
            index,
            resolver: SensitivityResolver::new(),
        }
    }

    /// Render one difference.
    ///
    /// Recognized kinds fail only with a malformed-difference render error,
    /// raised when a join target named by the record cannot be found.
    pub fn render(&self, d: &FlowDifference<'_>) -> Result<Vec<String>> {
        use DifferenceType as Kind;

        let lines = match &d.kind {
            Kind::ComponentAdded => self.render_lifecycle(d, d.component_b, "added")?,
            Kind::ComponentRemoved => self.render_lifecycle(d, d.component_a, "removed")?,
            Kind::NameChanged => vec![render_rename(d)?],
            Kind::PositionChanged => {
                let component = require_component(d)?;
                vec![format!(
                    "{LIST_MARKER}{} has been moved to another position",
                    indefinite(&component)
                )]
            }
            Kind::BundleChanged => vec![render_bundle(d)?],
            Kind::DestinationChanged => vec![render_destination(d)],
            Kind::PropertyChanged => vec![self.render_property_changed(d)?],
            Kind::PropertyAdded => vec![self.render_property_set(d, "a property has been added")?],
            Kind::PropertyParameterized => vec![self
                .render_property_set(d, "a property is now referencing a parameter")?],
            Kind::PropertyRemoved => {
                vec![render_property_unset(d, "has been removed")?]
            }
            Kind::PropertyParameterizationRemoved => {
                vec![render_property_unset(d, "is no longer referencing a parameter")?]
            }
            Kind::ConcurrentTasksChanged => vec![render_concurrent_tasks(d)?],
            Kind::BulletinLevelChanged => vec![render_field_change(d, "bulletin level")?],
            Kind::RunDurationChanged => vec![render_field_change(d, "Run Duration")?],
            Kind::RunScheduleChanged => vec![render_field_change(d, "Run Schedule")?],
            Kind::AutoTerminatedRelationshipsChanged => {
                vec![render_field_change(d, "list of auto-terminated relationships")?]
            }
            Kind::PenaltyDurationChanged => vec![render_field_change(d, "penalty duration")?],
            Kind::YieldDurationChanged => vec![render_field_change(d, "yield duration")?],
            Kind::SchedulingStrategyChanged => {
                vec![render_field_change(d, "Scheduling Strategy")?]
            }
            Kind::ScheduledStateChanged => vec![render_field_change(d, "Schedule State")?],
            Kind::BackpressureDataSizeThresholdChanged => {
                vec![render_connection_setting(d, "data size backpressure threshold")?]
            }
            Kind::BackpressureObjectThresholdChanged => {
                vec![render_connection_setting(d, "flowfile number backpressure threshold")?]
            }
            Kind::LoadBalanceStrategyChanged => {
                vec![render_connection_setting(d, "load balancing strategy")?]
            }
            Kind::LoadBalanceCompressionChanged => {
                vec![render_connection_setting(d, "load balancing compression")?]
            }
            Kind::FlowfileExpirationChanged => {
                vec![render_connection_setting(d, "flow file expiration")?]
            }
            Kind::BendpointsChanged => {
                let component = require_component(d)?;
                vec![format!(
                    "{LIST_MARKER}The bending points for {} have been changed",
                    connection_or_subject(&component)
                )]
            }
            Kind::ParameterContextChanged => vec![self.render_context_binding(d)?],
            Kind::ParameterAdded => vec![self.render_parameter_added(d)?],
            Kind::ParameterRemoved => {
                let context = context_name(d)?;
                let key = require_field(d)?;
                vec![format!(
                    "{LIST_MARKER}In the Parameter Context `{context}` the parameter `{key}` has been removed"
                )]
            }
            Kind::ParameterValueChanged => vec![self.render_parameter_value_changed(d)?],
            Kind::InheritedContextsChanged => {
                let context = context_name(d)?;
                vec![format!(
                    "{LIST_MARKER}In the Parameter Context `{context}`, the list of inherited parameter contexts changed from `{}` to `{}`",
                    display_value(d.value_a.as_ref()),
                    display_value(d.value_b.as_ref())
                )]
            }
            Kind::CommentsChanged
            | Kind::ExecutionNodeChanged
            | Kind::SourceChanged
            | Kind::SelectedRelationshipsChanged
            | Kind::PrioritizersChanged
            | Kind::PartitioningAttributeChanged
            | Kind::FlowfileConcurrencyChanged
            | Kind::FlowfileOutboundPolicyChanged
            | Kind::DefaultFlowfileExpirationChanged
            | Kind::DefaultBackpressureObjectCountChanged
            | Kind::DefaultBackpressureDataSizeChanged
            | Kind::LabelValueChanged
            | Kind::SizeChanged
            | Kind::RpgUrlChanged
            | Kind::ParameterDescriptionChanged
            | Kind::DescriptionChanged
            | Kind::Unrecognized(_) => self.render_fallback(d),
        };
        Ok(lines)
    }

    // ========================================================================
    // Additions and removals
    // ========================================================================

    fn render_lifecycle(
        &self,
        d: &FlowDifference<'_>,
        component: Option<Component<'_>>,
        verb: &str,
    ) -> Result<Vec<String>> {
        let component = component.ok_or_else(|| {
            malformed(d, format!("no component on the {verb} side"))
        })?;

        let lines = match component {
            Component::Funnel(_) => vec![format!("{LIST_MARKER}A Funnel has been {verb}")],
            Component::Connection(c) if c.is_self_loop() => vec![format!(
                "{LIST_MARKER}A self-loop connection `{}` has been {verb} on `{}`",
                c.label(),
                c.source
            )],
            Component::Connection(c) => vec![format!(
                "{LIST_MARKER}A connection `{}` from `{}` to `{}` has been {verb}",
                c.label(),
                c.source,
                c.destination
            )],
            Component::Processor(p) => {
                self.configuration_block(&component, p, p.properties.keys(), verb)
            }
            Component::ControllerService(s) => {
                self.configuration_block(&component, s, s.properties.keys(), verb)
            }
            other => vec![format!("{LIST_MARKER}{} has been {verb}", indefinite(&other))],
        };
        Ok(lines)
    }

    /// Header line plus one nested line per property, in document order.
    fn configuration_block<'k>(
        &self,
        component: &Component<'_>,
        owner: &dyn PropertyOwner,
        keys: impl ExactSizeIterator<Item = &'k String>,
        verb: &str,
    ) -> Vec<String> {
        if keys.len() == 0 {
            return vec![format!("{LIST_MARKER}{} has been {verb}", indefinite(component))];
        }
        let mut lines = Vec::with_capacity(keys.len() + 1);
        lines.push(format!(
            "{LIST_MARKER}{} has been {verb} with the below configuration",
            indefinite(component)
        ));
        for key in keys {
            lines.push(format!(
                "{NESTED_MARKER}`{key}` = `{}`",
                self.owner_value(owner, key)
            ));
        }
        lines
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn render_property_changed(&self, d: &FlowDifference<'_>) -> Result<String> {
        let component = require_component(d)?;
        let key = require_field(d)?;
        let redact = self.either_side_sensitive(d, key);
        Ok(format!(
            "{LIST_MARKER}In {}, the value of the property `{key}` changed from `{}` to `{}`",
            subject(&component),
            self.property_side(d.component_a, key, d.value_a.as_ref(), redact),
            self.property_side(d.component_b, key, d.value_b.as_ref(), redact)
        ))
    }

    fn render_property_set(&self, d: &FlowDifference<'_>, phrase: &str) -> Result<String> {
        let component = require_component(d)?;
        let key = require_field(d)?;
        let redact = self.either_side_sensitive(d, key);
        Ok(format!(
            "{LIST_MARKER}In {}, {phrase}: `{key}` = `{}`",
            subject(&component),
            self.property_side(d.component_b, key, d.value_b.as_ref(), redact)
        ))
    }

    fn either_side_sensitive(&self, d: &FlowDifference<'_>, key: &str) -> bool {
        [d.component_a, d.component_b]
            .into_iter()
            .flatten()
            .filter_map(property_owner)
            .any(|owner| self.resolver.is_sensitive(owner, key))
    }

    /// Printable value of `key` on one side, read back from the component
    /// when it carries properties and from the record otherwise.
    fn property_side(
        &self,
        component: Option<Component<'_>>,
        key: &str,
        recorded: Option<&DiffValue>,
        redact: bool,
    ) -> String {
        if redact {
            return SENSITIVE_PLACEHOLDER.to_string();
        }
        match component.and_then(property_owner) {
            Some(owner) => self.owner_value(owner, key),
            None => display_value(recorded),
        }
    }

    fn owner_value(&self, owner: &dyn PropertyOwner, key: &str) -> String {
        match self.resolver.resolve(owner, key) {
            Ok(value) => value.to_string(),
            Err(err) => {
                tracing::warn!(
                    owner = owner.owner_id(),
                    field = key,
                    "{err}; rendering an empty value"
                );
                String::new()
            }
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    fn render_context_binding(&self, d: &FlowDifference<'_>) -> Result<String> {
        let group = require_component(d)?;
        let Some(bound) = d.value_b.as_ref().map(ToString::to_string) else {
            return Ok(format!(
                "{LIST_MARKER}The parameter context `{}` has been removed from the process group `{}`",
                display_value(d.value_a.as_ref()),
                group.display_name()
            ));
        };

        let context = self.index.get(&bound).ok_or_else(|| {
            malformed(
                d,
                format!("parameter context `{bound}` is not defined in the compared flow"),
            )
        })?;

        let mut parameters: Vec<&Parameter> = context.parameters.iter().collect();
        if parameters.is_empty() {
            return Ok(format!(
                "{LIST_MARKER}The parameter context `{bound}` has been added to the process group `{}`",
                group.display_name()
            ));
        }
        parameters.sort_by(|x, y| x.name.cmp(&y.name));
        let listed = parameters
            .iter()
            .map(|p| format!("{}={}", p.name, self.resolver.resolve_parameter(p)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "{LIST_MARKER}The parameter context `{bound}` with parameters `{listed}` has been added to the process group `{}`",
            group.display_name()
        ))
    }

    fn render_parameter_added(&self, d: &FlowDifference<'_>) -> Result<String> {
        let key = require_field(d)?;
        let context = parameter_context(d.component_b.or(d.component_a))
            .ok_or_else(|| malformed(d, "no parameter context to read the parameter from"))?;
        let parameter = context.parameter(key).ok_or_else(|| {
            malformed(
                d,
                format!(
                    "parameter `{key}` not found in parameter context `{}`",
                    context.name
                ),
            )
        })?;
        Ok(format!(
            "{LIST_MARKER}In the Parameter Context `{}` a parameter has been added: `{key}` = `{}`",
            context.name,
            self.resolver.resolve_parameter(parameter)
        ))
    }

    fn render_parameter_value_changed(&self, d: &FlowDifference<'_>) -> Result<String> {
        let key = require_field(d)?;
        let name = context_name(d)?;
        let before = parameter_context(d.component_a).and_then(|c| c.parameter(key));
        let after = parameter_context(d.component_b).and_then(|c| c.parameter(key));
        if before.is_none() && after.is_none() {
            return Err(malformed(
                d,
                format!("parameter `{key}` not found on either side of parameter context `{name}`"),
            ));
        }

        let redact = before.is_some_and(|p| p.sensitive) || after.is_some_and(|p| p.sensitive);
        let side = |parameter: Option<&Parameter>| -> String {
            match parameter {
                _ if redact => SENSITIVE_PLACEHOLDER.to_string(),
                Some(p) => self.resolver.resolve_parameter(p).to_string(),
                None => NO_VALUE.to_string(),
            }
        };
        Ok(format!(
            "{LIST_MARKER}In the Parameter Context `{name}`, the value of the parameter `{key}` has changed from `{}` to `{}`",
            side(before),
            side(after)
        ))
    }

    // ========================================================================
    // Fallback
    // ========================================================================

    /// Verbatim dump of the record. Values are still redacted when the field
    /// names a sensitive property or parameter of either component.
    fn render_fallback(&self, d: &FlowDifference<'_>) -> Vec<String> {
        let redact = d
            .field_name
            .as_deref()
            .is_some_and(|key| self.either_side_sensitive(d, key));
        let value = |v: Option<&DiffValue>| match v {
            Some(_) if redact => SENSITIVE_PLACEHOLDER.to_string(),
            Some(v) => v.to_string(),
            None => NONE_MARKER.to_string(),
        };
        let component =
            |c: Option<Component<'_>>| c.map_or_else(|| NONE_MARKER.to_string(), |c| c.to_string());
        let description = if d.description.is_empty() {
            d.kind.description()
        } else {
            d.description.as_str()
        };

        vec![
            format!("{LIST_MARKER}{description} ({})", d.kind),
            format!("{NESTED_MARKER}Value A: {}", value(d.value_a.as_ref())),
            format!("{NESTED_MARKER}Value B: {}", value(d.value_b.as_ref())),
            format!("{NESTED_MARKER}Component A: {}", component(d.component_a)),
            format!("{NESTED_MARKER}Component B: {}", component(d.component_b)),
            format!(
                "{NESTED_MARKER}Field: {}",
                d.field_name.as_deref().unwrap_or(NONE_MARKER)
            ),
        ]
    }
}

// ============================================================================
// Sentence helpers
// ============================================================================

fn render_rename(d: &FlowDifference<'_>) -> Result<String> {
    let component = require_component(d)?;
    let name = |value: Option<&DiffValue>, side: Option<Component<'_>>| {
        value
            .map(ToString::to_string)
            .or_else(|| side.and_then(|c| c.name()).map(str::to_string))
            .unwrap_or_else(|| NO_VALUE.to_string())
    };
    Ok(format!(
        "{LIST_MARKER}{} {} has been renamed from `{}` to `{}`",
        article(component.component_type()),
        component.component_type(),
        name(d.value_a.as_ref(), d.component_a),
        name(d.value_b.as_ref(), d.component_b)
    ))
}

fn render_bundle(d: &FlowDifference<'_>) -> Result<String> {
    let component = require_component(d)?;
    match (&d.value_a, &d.value_b) {
        (Some(DiffValue::Bundle(before)), Some(DiffValue::Bundle(after)))
            if before.coordinate() == after.coordinate() =>
        {
            Ok(format!(
                "{LIST_MARKER}In {}, the bundle `{}` has been changed from version `{}` to version `{}`",
                subject(&component),
                after.coordinate(),
                before.version,
                after.version
            ))
        }
        _ => render_field_change(d, "bundle"),
    }
}

fn render_destination(d: &FlowDifference<'_>) -> String {
    let before = display_value(d.value_a.as_ref());
    let after = display_value(d.value_b.as_ref());
    match d.component() {
        Some(Component::Connection(c)) => format!(
            "{LIST_MARKER}The destination of the connection `{}` from `{}` has changed from `{before}` to `{after}`",
            c.label(),
            c.source
        ),
        _ => format!(
            "{LIST_MARKER}The destination of a connection has changed from `{before}` to `{after}`"
        ),
    }
}

fn render_property_unset(d: &FlowDifference<'_>, phrase: &str) -> Result<String> {
    let component = require_component(d)?;
    let key = require_field(d)?;
    Ok(format!(
        "{LIST_MARKER}In {}, the property `{key}` {phrase}",
        subject(&component)
    ))
}

/// The only directional sentence: `decreased` when before > after.
fn render_concurrent_tasks(d: &FlowDifference<'_>) -> Result<String> {
    let component = require_component(d)?;
    let (Some(before), Some(after)) = (
        d.value_a.as_ref().and_then(DiffValue::as_integer),
        d.value_b.as_ref().and_then(DiffValue::as_integer),
    ) else {
        return Err(malformed(d, "concurrent task counts are not both numeric"));
    };
    let direction = if before > after {
        "decreased"
    } else {
        "increased"
    };
    Ok(format!(
        "{LIST_MARKER}In {}, the number of concurrent tasks has been {direction} from `{before}` to `{after}`",
        subject(&component)
    ))
}

fn render_field_change(d: &FlowDifference<'_>, field: &str) -> Result<String> {
    let component = require_component(d)?;
    Ok(format!(
        "{LIST_MARKER}In {}, the {field} changed from `{}` to `{}`",
        subject(&component),
        display_value(d.value_a.as_ref()),
        display_value(d.value_b.as_ref())
    ))
}

fn render_connection_setting(d: &FlowDifference<'_>, setting: &str) -> Result<String> {
    let component = require_component(d)?;
    Ok(format!(
        "{LIST_MARKER}The {setting} for {} has been changed from `{}` to `{}`",
        connection_or_subject(&component),
        display_value(d.value_a.as_ref()),
        display_value(d.value_b.as_ref())
    ))
}

fn connection_or_subject(component: &Component<'_>) -> String {
    match component {
        Component::Connection(c) => connection_phrase(c),
        other => subject(other),
    }
}

fn connection_phrase(connection: &Connection) -> String {
    format!(
        "the connection `{}` from `{}` to `{}`",
        connection.label(),
        connection.source,
        connection.destination
    )
}

/// `the Processor named `X`` or `the Funnel with identifier `f1``.
fn subject(component: &Component<'_>) -> String {
    match component.name() {
        Some(name) => format!("the {} named `{name}`", component.component_type()),
        None => format!(
            "the {} with identifier `{}`",
            component.component_type(),
            component.id()
        ),
    }
}

/// `A Processor named `X`` or `An Input Port`.
fn indefinite(component: &Component<'_>) -> String {
    let kind = component.component_type();
    match component.name() {
        Some(name) => format!("{} {kind} named `{name}`", article(kind)),
        None => format!("{} {kind}", article(kind)),
    }
}

fn article(kind: ComponentType) -> &'static str {
    match kind {
        ComponentType::InputPort | ComponentType::OutputPort => "An",
        _ => "A",
    }
}

fn display_value(value: Option<&DiffValue>) -> String {
    value.map_or_else(|| NO_VALUE.to_string(), ToString::to_string)
}

fn property_owner<'c>(component: Component<'c>) -> Option<&'c dyn PropertyOwner> {
    match component {
        Component::Processor(p) => Some(p as &dyn PropertyOwner),
        Component::ControllerService(s) => Some(s as &dyn PropertyOwner),
        Component::ParameterContext(c) => Some(c as &dyn PropertyOwner),
        _ => None,
    }
}

/// Parameter records only ever carry the context itself; any other
/// component kind leaves the record without a context.
fn parameter_context<'c>(component: Option<Component<'c>>) -> Option<&'c ParameterContext> {
    match component? {
        Component::ParameterContext(context) => Some(context),
        _ => None,
    }
}

fn context_name<'d>(d: &FlowDifference<'d>) -> Result<&'d str> {
    parameter_context(d.component())
        .map(|context| context.name.as_str())
        .ok_or_else(|| malformed(d, "no parameter context on either side"))
}

fn require_component<'d>(d: &FlowDifference<'d>) -> Result<Component<'d>> {
    d.component()
        .ok_or_else(|| malformed(d, "no component on either side"))
}

fn require_field<'f>(d: &'f FlowDifference<'_>) -> Result<&'f str> {
    d.field_name
        .as_deref()
        .ok_or_else(|| malformed(d, "no field name"))
}

fn malformed(d: &FlowDifference<'_>, reason: impl Into<String>) -> FlowDiffError {
    FlowDiffError::malformed(d.kind.as_str(), reason)
}
