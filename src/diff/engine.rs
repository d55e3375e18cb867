//! Identifier-matching flow comparator.

use super::changes::{
    compare_connection, compare_controller_service, compare_funnel, compare_group_fields,
    compare_label, compare_parameter_contexts, compare_port, compare_processor,
    compare_remote_group, match_by_id, Matched,
};
use super::traits::{ComparableFlow, ComparatorStrategy, FlowComparator, FlowComparison};
use super::FlowDifference;
use crate::error::{CompareErrorKind, FlowDiffError, Result};
use crate::model::{Component, ComponentType, ProcessGroup};
use std::collections::HashSet;

/// Comparator that walks both process-group trees in lockstep, matching
/// components of the same kind by identifier.
#[derive(Debug, Clone, Default)]
pub struct StandardFlowComparator {
    strategy: ComparatorStrategy,
}

impl StandardFlowComparator {
    /// Create a comparator using the deep strategy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: ComparatorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> ComparatorStrategy {
        self.strategy
    }

    fn compare_groups<'a>(
        &self,
        a: &'a ProcessGroup,
        b: &'a ProcessGroup,
        is_root: bool,
        out: &mut Vec<FlowDifference<'a>>,
    ) {
        compare_group_fields(a, b, is_root, out);

        let controller_services = match_by_id(&a.controller_services, &b.controller_services, |c| {
            c.identifier.as_str()
        });
        emit(
            controller_services,
            Component::ControllerService,
            compare_controller_service,
            out,
        );

        let processors = match_by_id(&a.processors, &b.processors, |p| p.identifier.as_str());
        emit(processors, Component::Processor, compare_processor, out);

        let input_ports = match_by_id(&a.input_ports, &b.input_ports, |p| p.identifier.as_str());
        emit(input_ports, Component::Port, compare_port, out);

        let output_ports = match_by_id(&a.output_ports, &b.output_ports, |p| p.identifier.as_str());
        emit(output_ports, Component::Port, compare_port, out);

        let funnels = match_by_id(&a.funnels, &b.funnels, |f| f.identifier.as_str());
        emit(funnels, Component::Funnel, compare_funnel, out);

        let labels = match_by_id(&a.labels, &b.labels, |l| l.identifier.as_str());
        emit(labels, Component::Label, compare_label, out);

        let remote_groups = match_by_id(&a.remote_process_groups, &b.remote_process_groups, |r| {
            r.identifier.as_str()
        });
        emit(
            remote_groups,
            Component::RemoteProcessGroup,
            compare_remote_group,
            out,
        );

        let connections = match_by_id(&a.connections, &b.connections, |c| c.identifier.as_str());
        emit(connections, Component::Connection, compare_connection, out);

        let groups = match_by_id(&a.process_groups, &b.process_groups, |g| g.identifier.as_str());
        for group in groups.removed {
            out.push(FlowDifference::removed(Component::ProcessGroup(group)));
            if self.strategy == ComparatorStrategy::Deep {
                out.extend(descendants(group).into_iter().map(FlowDifference::removed));
            }
        }
        for (before, after) in groups.paired {
            self.compare_groups(before, after, false, out);
        }
        for group in groups.added {
            out.push(FlowDifference::added(Component::ProcessGroup(group)));
            if self.strategy == ComparatorStrategy::Deep {
                out.extend(descendants(group).into_iter().map(FlowDifference::added));
            }
        }
    }
}

impl FlowComparator for StandardFlowComparator {
    fn compare<'a>(
        &self,
        flow_a: &ComparableFlow<'a>,
        flow_b: &ComparableFlow<'a>,
    ) -> Result<FlowComparison<'a>> {
        check_flow(flow_a)?;
        check_flow(flow_b)?;

        let mut differences = Vec::new();
        self.compare_groups(flow_a.contents, flow_b.contents, true, &mut differences);
        compare_parameter_contexts(
            flow_a.parameter_contexts,
            flow_b.parameter_contexts,
            &mut differences,
        );

        tracing::debug!(
            strategy = ?self.strategy,
            differences = differences.len(),
            "Compared {} with {}",
            flow_a.label,
            flow_b.label
        );
        Ok(FlowComparison::new(differences))
    }

    fn name(&self) -> &str {
        "standard"
    }
}

/// Report removals, pairwise changes, then additions for one component kind.
fn emit<'a, T>(
    matched: Matched<'a, T>,
    wrap: fn(&'a T) -> Component<'a>,
    compare: fn(&'a T, &'a T, &mut Vec<FlowDifference<'a>>),
    out: &mut Vec<FlowDifference<'a>>,
) {
    for item in matched.removed {
        out.push(FlowDifference::removed(wrap(item)));
    }
    for (before, after) in matched.paired {
        compare(before, after, out);
    }
    for item in matched.added {
        out.push(FlowDifference::added(wrap(item)));
    }
}

/// Every component nested inside `group`, depth first, excluding the group.
fn descendants(group: &ProcessGroup) -> Vec<Component<'_>> {
    let mut components = Vec::new();
    collect_descendants(group, &mut components);
    components
}

fn collect_descendants<'a>(group: &'a ProcessGroup, out: &mut Vec<Component<'a>>) {
    out.extend(group.controller_services.iter().map(Component::ControllerService));
    out.extend(group.processors.iter().map(Component::Processor));
    out.extend(group.input_ports.iter().map(Component::Port));
    out.extend(group.output_ports.iter().map(Component::Port));
    out.extend(group.funnels.iter().map(Component::Funnel));
    out.extend(group.labels.iter().map(Component::Label));
    out.extend(group.remote_process_groups.iter().map(Component::RemoteProcessGroup));
    out.extend(group.connections.iter().map(Component::Connection));
    for child in &group.process_groups {
        out.push(Component::ProcessGroup(child));
        collect_descendants(child, out);
    }
}

/// Reject flows the identifier matcher cannot reconcile.
fn check_flow(flow: &ComparableFlow<'_>) -> Result<()> {
    let mut seen: HashSet<(ComponentType, &str)> = HashSet::new();
    let root = Component::ProcessGroup(flow.contents);
    for component in std::iter::once(root).chain(descendants(flow.contents)) {
        if !seen.insert((component.component_type(), component.id())) {
            return Err(FlowDiffError::compare(
                format!("matching components of {}", flow.label),
                CompareErrorKind::DuplicateIdentifier {
                    component: component.component_type().to_string(),
                    identifier: component.id().to_string(),
                    flow: flow.label.to_string(),
                },
            ));
        }
    }

    for (key, context) in flow.parameter_contexts {
        if context.id() != key {
            return Err(FlowDiffError::compare(
                format!("matching parameter contexts of {}", flow.label),
                CompareErrorKind::Irreconcilable(format!(
                    "parameter context keyed '{key}' is identified as '{}'",
                    context.id()
                )),
            ));
        }
    }
    Ok(())
}
