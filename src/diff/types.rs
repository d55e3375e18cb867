//! Difference records produced by a flow comparison.

use crate::model::{format_positions, Bundle, Component, ConnectableComponent, Position};
use std::fmt;
use std::str::FromStr;

macro_rules! difference_types {
    ($($variant:ident => $name:literal, $description:literal;)*) => {
        /// Kind of a single semantic change between two flow versions.
        ///
        /// The set is closed; kind names this build does not model parse to
        /// [`DifferenceType::Unrecognized`] and keep their original text.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum DifferenceType {
            $($variant,)*
            Unrecognized(String),
        }

        impl DifferenceType {
            /// Stable SCREAMING_SNAKE_CASE name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Unrecognized(name) => name,
                }
            }

            /// Short human description.
            #[must_use]
            pub fn description(&self) -> &str {
                match self {
                    $(Self::$variant => $description,)*
                    Self::Unrecognized(_) => "Unrecognized difference",
                }
            }

            /// Every modeled kind, in declaration order.
            #[must_use]
            pub fn known() -> Vec<Self> {
                vec![$(Self::$variant),*]
            }
        }

        impl FromStr for DifferenceType {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s.trim() {
                    $($name => Self::$variant,)*
                    other => Self::Unrecognized(other.to_string()),
                })
            }
        }
    };
}

difference_types! {
    ComponentAdded => "COMPONENT_ADDED", "Component added";
    ComponentRemoved => "COMPONENT_REMOVED", "Component removed";
    NameChanged => "NAME_CHANGED", "Name changed";
    CommentsChanged => "COMMENTS_CHANGED", "Comments changed";
    PositionChanged => "POSITION_CHANGED", "Position changed";
    BundleChanged => "BUNDLE_CHANGED", "Bundle changed";
    PropertyAdded => "PROPERTY_ADDED", "Property added";
    PropertyRemoved => "PROPERTY_REMOVED", "Property removed";
    PropertyChanged => "PROPERTY_CHANGED", "Property value changed";
    PropertyParameterized => "PROPERTY_PARAMETERIZED", "Property now references a parameter";
    PropertyParameterizationRemoved => "PROPERTY_PARAMETERIZATION_REMOVED", "Property no longer references a parameter";
    AutoTerminatedRelationshipsChanged => "AUTO_TERMINATED_RELATIONSHIPS_CHANGED", "Auto-terminated relationships changed";
    BulletinLevelChanged => "BULLETIN_LEVEL_CHANGED", "Bulletin level changed";
    ConcurrentTasksChanged => "CONCURRENT_TASKS_CHANGED", "Concurrent tasks changed";
    PenaltyDurationChanged => "PENALTY_DURATION_CHANGED", "Penalty duration changed";
    YieldDurationChanged => "YIELD_DURATION_CHANGED", "Yield duration changed";
    RunDurationChanged => "RUN_DURATION_CHANGED", "Run duration changed";
    RunScheduleChanged => "RUN_SCHEDULE_CHANGED", "Run schedule changed";
    SchedulingStrategyChanged => "SCHEDULING_STRATEGY_CHANGED", "Scheduling strategy changed";
    ExecutionNodeChanged => "EXECUTION_NODE_CHANGED", "Execution node changed";
    ScheduledStateChanged => "SCHEDULED_STATE_CHANGED", "Scheduled state changed";
    SourceChanged => "SOURCE_CHANGED", "Connection source changed";
    DestinationChanged => "DESTINATION_CHANGED", "Connection destination changed";
    SelectedRelationshipsChanged => "SELECTED_RELATIONSHIPS_CHANGED", "Selected relationships changed";
    BackpressureObjectThresholdChanged => "BACKPRESSURE_OBJECT_THRESHOLD_CHANGED", "Backpressure object threshold changed";
    BackpressureDataSizeThresholdChanged => "BACKPRESSURE_DATA_SIZE_THRESHOLD_CHANGED", "Backpressure data size threshold changed";
    FlowfileExpirationChanged => "FLOWFILE_EXPIRATION_CHANGED", "FlowFile expiration changed";
    PrioritizersChanged => "PRIORITIZERS_CHANGED", "Prioritizers changed";
    LoadBalanceStrategyChanged => "LOAD_BALANCE_STRATEGY_CHANGED", "Load balance strategy changed";
    PartitioningAttributeChanged => "PARTITIONING_ATTRIBUTE_CHANGED", "Partitioning attribute changed";
    LoadBalanceCompressionChanged => "LOAD_BALANCE_COMPRESSION_CHANGED", "Load balance compression changed";
    BendpointsChanged => "BENDPOINTS_CHANGED", "Connection bend points changed";
    ParameterContextChanged => "PARAMETER_CONTEXT_CHANGED", "Parameter context changed";
    FlowfileConcurrencyChanged => "FLOWFILE_CONCURRENCY_CHANGED", "FlowFile concurrency changed";
    FlowfileOutboundPolicyChanged => "FLOWFILE_OUTBOUND_POLICY_CHANGED", "FlowFile outbound policy changed";
    DefaultFlowfileExpirationChanged => "DEFAULT_FLOWFILE_EXPIRATION_CHANGED", "Default FlowFile expiration changed";
    DefaultBackpressureObjectCountChanged => "DEFAULT_BACKPRESSURE_OBJECT_COUNT_CHANGED", "Default backpressure object count changed";
    DefaultBackpressureDataSizeChanged => "DEFAULT_BACKPRESSURE_DATA_SIZE_CHANGED", "Default backpressure data size changed";
    LabelValueChanged => "LABEL_VALUE_CHANGED", "Label text changed";
    SizeChanged => "SIZE_CHANGED", "Size changed";
    RpgUrlChanged => "RPG_URL_CHANGED", "Remote process group URL changed";
    ParameterAdded => "PARAMETER_ADDED", "Parameter added";
    ParameterRemoved => "PARAMETER_REMOVED", "Parameter removed";
    ParameterValueChanged => "PARAMETER_VALUE_CHANGED", "Parameter value changed";
    ParameterDescriptionChanged => "PARAMETER_DESCRIPTION_CHANGED", "Parameter description changed";
    InheritedContextsChanged => "INHERITED_CONTEXTS_CHANGED", "Inherited parameter contexts changed";
    DescriptionChanged => "DESCRIPTION_CHANGED", "Description changed";
}

impl fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-dependent payload of a difference.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffValue {
    Text(String),
    Integer(i64),
    /// A set or list of names, rendered as `[a, b]`
    Strings(Vec<String>),
    Bundle(Bundle),
    Connectable(ConnectableComponent),
    Position(Position),
    Positions(Vec<Position>),
    Size { width: f64, height: f64 },
}

impl DiffValue {
    /// Integer payload, parsing text when needed.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for DiffValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DiffValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DiffValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Strings(items) => write!(f, "[{}]", items.join(", ")),
            Self::Bundle(bundle) => write!(f, "{bundle}"),
            Self::Connectable(c) => write!(f, "{c}"),
            Self::Position(p) => write!(f, "{p}"),
            Self::Positions(points) => f.write_str(&format_positions(points)),
            Self::Size { width, height } => write!(f, "{width} x {height}"),
        }
    }
}

/// One semantic change between flow version A and flow version B.
///
/// `component_a` is absent for additions and `component_b` for removals.
/// Records are created by a comparator for a single run and never mutated
/// after that.
#[derive(Debug, Clone)]
pub struct FlowDifference<'a> {
    pub kind: DifferenceType,
    pub component_a: Option<Component<'a>>,
    pub component_b: Option<Component<'a>>,
    pub value_a: Option<DiffValue>,
    pub value_b: Option<DiffValue>,
    /// Property or parameter key, for differences about a named field
    pub field_name: Option<String>,
    /// Value-free summary of the change
    pub description: String,
}

impl<'a> FlowDifference<'a> {
    /// Create a record without payload values.
    #[must_use]
    pub fn new(
        kind: DifferenceType,
        component_a: Option<Component<'a>>,
        component_b: Option<Component<'a>>,
    ) -> Self {
        let description = component_b
            .or(component_a)
            .map(|c| describe(&kind, &c))
            .unwrap_or_else(|| kind.description().to_string());
        Self {
            kind,
            component_a,
            component_b,
            value_a: None,
            value_b: None,
            field_name: None,
            description,
        }
    }

    /// A component present only on side B.
    #[must_use]
    pub fn added(component: Component<'a>) -> Self {
        Self::new(DifferenceType::ComponentAdded, None, Some(component))
    }

    /// A component present only on side A.
    #[must_use]
    pub fn removed(component: Component<'a>) -> Self {
        Self::new(DifferenceType::ComponentRemoved, Some(component), None)
    }

    #[must_use]
    pub fn with_values(mut self, value_a: Option<DiffValue>, value_b: Option<DiffValue>) -> Self {
        self.value_a = value_a;
        self.value_b = value_b;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The component this record is about, preferring side B.
    #[must_use]
    pub fn component(&self) -> Option<Component<'a>> {
        self.component_b.or(self.component_a)
    }

    /// Stable ordering key: kind, then component identifier, then field.
    #[must_use]
    pub fn sort_key(&self) -> (&DifferenceType, &str, &str) {
        let id = self
            .component_a
            .or(self.component_b)
            .map_or("", |c| c.id());
        (&self.kind, id, self.field_name.as_deref().unwrap_or(""))
    }
}

fn describe(kind: &DifferenceType, component: &Component<'_>) -> String {
    match component.name() {
        Some(name) => format!(
            "{} in {} `{}`",
            kind.description(),
            component.component_type(),
            name
        ),
        None => format!("{} in {}", kind.description(), component.component_type()),
    }
}

/// Sort differences by [`FlowDifference::sort_key`].
pub fn sort_differences(differences: &mut [FlowDifference<'_>]) {
    differences.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
