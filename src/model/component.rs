//! Polymorphic view over the versioned components of a snapshot.

use super::{
    Connection, ControllerService, Funnel, Label, ParameterContext, Port, PortType, ProcessGroup,
    Processor, RemoteProcessGroup,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a versioned component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Processor,
    ControllerService,
    Connection,
    ProcessGroup,
    Funnel,
    InputPort,
    OutputPort,
    Label,
    RemoteProcessGroup,
    ParameterContext,
}

impl ComponentType {
    /// Human-readable label used in report sentences.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Processor => "Processor",
            Self::ControllerService => "Controller Service",
            Self::Connection => "Connection",
            Self::ProcessGroup => "Process Group",
            Self::Funnel => "Funnel",
            Self::InputPort => "Input Port",
            Self::OutputPort => "Output Port",
            Self::Label => "Label",
            Self::RemoteProcessGroup => "Remote Process Group",
            Self::ParameterContext => "Parameter Context",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A borrowed reference to any versioned component.
///
/// Components are owned by the snapshot that produced them; a component on
/// side A and its counterpart on side B are distinct values matched only by
/// identifier.
#[derive(Debug, Clone, Copy)]
pub enum Component<'a> {
    Processor(&'a Processor),
    ControllerService(&'a ControllerService),
    Connection(&'a Connection),
    ProcessGroup(&'a ProcessGroup),
    Funnel(&'a Funnel),
    Port(&'a Port),
    Label(&'a Label),
    RemoteProcessGroup(&'a RemoteProcessGroup),
    ParameterContext(&'a ParameterContext),
}

impl<'a> Component<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        match *self {
            Self::Processor(c) => &c.identifier,
            Self::ControllerService(c) => &c.identifier,
            Self::Connection(c) => &c.identifier,
            Self::ProcessGroup(c) => &c.identifier,
            Self::Funnel(c) => &c.identifier,
            Self::Port(c) => &c.identifier,
            Self::Label(c) => &c.identifier,
            Self::RemoteProcessGroup(c) => &c.identifier,
            Self::ParameterContext(c) => c.id(),
        }
    }

    /// Component name; empty names count as absent.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        let name = match *self {
            Self::Processor(c) => c.name.as_deref(),
            Self::ControllerService(c) => c.name.as_deref(),
            Self::Connection(c) => c.name.as_deref(),
            Self::ProcessGroup(c) => c.name.as_deref(),
            Self::Port(c) => c.name.as_deref(),
            Self::RemoteProcessGroup(c) => c.name.as_deref(),
            Self::ParameterContext(c) => Some(c.name.as_str()),
            Self::Funnel(_) | Self::Label(_) => None,
        };
        name.filter(|n| !n.is_empty())
    }

    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Processor(_) => ComponentType::Processor,
            Self::ControllerService(_) => ComponentType::ControllerService,
            Self::Connection(_) => ComponentType::Connection,
            Self::ProcessGroup(_) => ComponentType::ProcessGroup,
            Self::Funnel(_) => ComponentType::Funnel,
            Self::Port(p) => match p.port_type {
                PortType::InputPort => ComponentType::InputPort,
                PortType::OutputPort => ComponentType::OutputPort,
            },
            Self::Label(_) => ComponentType::Label,
            Self::RemoteProcessGroup(_) => ComponentType::RemoteProcessGroup,
            Self::ParameterContext(_) => ComponentType::ParameterContext,
        }
    }

    /// Name when present, identifier otherwise.
    #[must_use]
    pub fn display_name(&self) -> &'a str {
        self.name().unwrap_or_else(|| self.id())
    }
}

impl fmt::Display for Component<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(
                f,
                "{}[id={}, name={}]",
                self.component_type(),
                self.id(),
                name
            ),
            None => write!(f, "{}[id={}]", self.component_type(), self.id()),
        }
    }
}
