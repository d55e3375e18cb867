//! Flow snapshot document and versioned component structures.
//!
//! These mirror the JSON layout of a registered flow snapshot. Every
//! collection defaults to empty and unknown fields are ignored, so snapshots
//! written by newer registries still decode.

use super::ParameterContext;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A decoded flow snapshot: metadata, the root process group and the
/// parameter contexts it can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    /// Versioned flow metadata (name, identifier)
    #[serde(default)]
    pub flow: Option<FlowMetadata>,
    /// Snapshot metadata (version, author, commit comments)
    #[serde(default)]
    pub snapshot_metadata: Option<SnapshotMetadata>,
    /// Root process group
    pub flow_contents: ProcessGroup,
    /// Parameter contexts keyed by name
    #[serde(default)]
    pub parameter_contexts: IndexMap<String, ParameterContext>,
}

impl FlowSnapshot {
    /// Name of the flow this snapshot belongs to.
    ///
    /// Falls back to the root group name when the snapshot carries no flow
    /// metadata.
    #[must_use]
    pub fn flow_name(&self) -> &str {
        self.flow
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .filter(|n| !n.is_empty())
            .or_else(|| self.flow_contents.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Unnamed flow")
    }

    /// Total number of versioned components in the snapshot, groups included.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.flow_contents.component_count() + self.parameter_contexts.len()
    }
}

/// Versioned flow metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMetadata {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Snapshot metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Canvas coordinates of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Extension bundle coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bundle {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Bundle {
    /// `group:artifact` without the version.
    #[must_use]
    pub fn coordinate(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Descriptor of a single configurable property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub identifies_controller_service: Option<String>,
}

/// A process group: the nameable container for every other component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessGroup {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub parameter_context_name: Option<String>,
    #[serde(default)]
    pub flow_file_concurrency: Option<String>,
    #[serde(default)]
    pub flow_file_outbound_policy: Option<String>,
    #[serde(default)]
    pub default_flow_file_expiration: Option<String>,
    #[serde(default)]
    pub default_back_pressure_object_threshold: Option<i64>,
    #[serde(default)]
    pub default_back_pressure_data_size_threshold: Option<String>,
    #[serde(default)]
    pub process_groups: Vec<ProcessGroup>,
    #[serde(default)]
    pub processors: Vec<Processor>,
    #[serde(default)]
    pub controller_services: Vec<ControllerService>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub funnels: Vec<Funnel>,
    #[serde(default)]
    pub input_ports: Vec<Port>,
    #[serde(default)]
    pub output_ports: Vec<Port>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub remote_process_groups: Vec<RemoteProcessGroup>,
}

impl ProcessGroup {
    /// Number of components in this group and all nested groups, including
    /// the group itself.
    #[must_use]
    pub fn component_count(&self) -> usize {
        1 + self.processors.len()
            + self.controller_services.len()
            + self.connections.len()
            + self.funnels.len()
            + self.input_ports.len()
            + self.output_ports.len()
            + self.labels.len()
            + self.remote_process_groups.len()
            + self
                .process_groups
                .iter()
                .map(ProcessGroup::component_count)
                .sum::<usize>()
    }
}

/// A processor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Processor {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default, rename = "type")]
    pub processor_type: Option<String>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub properties: IndexMap<String, Option<String>>,
    #[serde(default)]
    pub property_descriptors: IndexMap<String, PropertyDescriptor>,
    #[serde(default)]
    pub scheduling_period: Option<String>,
    #[serde(default)]
    pub scheduling_strategy: Option<String>,
    #[serde(default)]
    pub execution_node: Option<String>,
    #[serde(default)]
    pub penalty_duration: Option<String>,
    #[serde(default)]
    pub yield_duration: Option<String>,
    #[serde(default)]
    pub bulletin_level: Option<String>,
    #[serde(default)]
    pub run_duration_millis: Option<i64>,
    #[serde(default)]
    pub concurrently_schedulable_task_count: Option<i64>,
    #[serde(default)]
    pub auto_terminated_relationships: BTreeSet<String>,
    #[serde(default)]
    pub scheduled_state: Option<String>,
}

/// A controller service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerService {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub properties: IndexMap<String, Option<String>>,
    #[serde(default)]
    pub property_descriptors: IndexMap<String, PropertyDescriptor>,
    #[serde(default)]
    pub bulletin_level: Option<String>,
    #[serde(default)]
    pub scheduled_state: Option<String>,
}

/// Endpoint reference carried by a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectableComponent {
    pub id: String,
    #[serde(default, rename = "type")]
    pub connectable_type: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ConnectableComponent {
    /// Display name, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

impl fmt::Display for ConnectableComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A connection between two connectable components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    pub source: ConnectableComponent,
    pub destination: ConnectableComponent,
    #[serde(default)]
    pub selected_relationships: BTreeSet<String>,
    #[serde(default)]
    pub back_pressure_object_threshold: Option<i64>,
    #[serde(default)]
    pub back_pressure_data_size_threshold: Option<String>,
    #[serde(default)]
    pub flow_file_expiration: Option<String>,
    #[serde(default)]
    pub prioritizers: Vec<String>,
    #[serde(default)]
    pub bends: Vec<Position>,
    #[serde(default)]
    pub load_balance_strategy: Option<String>,
    #[serde(default)]
    pub partitioning_attribute: Option<String>,
    #[serde(default)]
    pub load_balance_compression: Option<String>,
}

impl Connection {
    /// A connection whose source and destination share an identifier.
    ///
    /// Names play no part: two differently named endpoints with the same
    /// identifier are still a self-loop.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source.id == self.destination.id
    }

    /// The connection's name, or its relationship set when unnamed.
    #[must_use]
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format_set(&self.selected_relationships),
        }
    }
}

/// A funnel. Funnels carry no name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub identifier: String,
    #[serde(default)]
    pub position: Option<Position>,
}

/// Direction of a port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortType {
    #[default]
    InputPort,
    OutputPort,
}

/// An input or output port.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default, rename = "type")]
    pub port_type: PortType,
    #[serde(default)]
    pub concurrently_schedulable_task_count: Option<i64>,
    #[serde(default)]
    pub scheduled_state: Option<String>,
}

/// A canvas label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// A remote process group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProcessGroup {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub target_uris: Option<String>,
}

/// Format a set of names as `[a, b, c]`.
pub fn format_set<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

/// Format bend points as `[(x, y), ...]`.
pub fn format_positions(points: &[Position]) -> String {
    let joined = points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
