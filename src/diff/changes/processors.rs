//! Processor and controller service comparison, including the property
//! lifecycle.

use super::{compare_common, integer, push_if_changed, strings, text};
use crate::diff::{DiffValue, DifferenceType, FlowDifference};
use crate::model::{Component, ControllerService, Processor, PropertyDescriptor};
use indexmap::{IndexMap, IndexSet};

pub(crate) fn compare_processor<'a>(
    a: &'a Processor,
    b: &'a Processor,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (Component::Processor(a), Component::Processor(b));
    compare_common(
        out,
        pair,
        (&a.name, &b.name),
        (&a.comments, &b.comments),
        Some((&a.position, &b.position)),
    );
    push_if_changed(out, DifferenceType::BundleChanged, pair, &a.bundle, &b.bundle, |v| {
        v.clone().map(DiffValue::Bundle)
    });
    compare_properties(
        out,
        pair,
        (&a.properties, &b.properties),
        (&a.property_descriptors, &b.property_descriptors),
    );
    push_if_changed(
        out,
        DifferenceType::AutoTerminatedRelationshipsChanged,
        pair,
        &a.auto_terminated_relationships,
        &b.auto_terminated_relationships,
        |v| strings(v),
    );
    push_if_changed(
        out,
        DifferenceType::BulletinLevelChanged,
        pair,
        &a.bulletin_level,
        &b.bulletin_level,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::ConcurrentTasksChanged,
        pair,
        &a.concurrently_schedulable_task_count,
        &b.concurrently_schedulable_task_count,
        integer,
    );
    push_if_changed(
        out,
        DifferenceType::PenaltyDurationChanged,
        pair,
        &a.penalty_duration,
        &b.penalty_duration,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::YieldDurationChanged,
        pair,
        &a.yield_duration,
        &b.yield_duration,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::RunDurationChanged,
        pair,
        &a.run_duration_millis,
        &b.run_duration_millis,
        integer,
    );
    push_if_changed(
        out,
        DifferenceType::RunScheduleChanged,
        pair,
        &a.scheduling_period,
        &b.scheduling_period,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::SchedulingStrategyChanged,
        pair,
        &a.scheduling_strategy,
        &b.scheduling_strategy,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::ExecutionNodeChanged,
        pair,
        &a.execution_node,
        &b.execution_node,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::ScheduledStateChanged,
        pair,
        &a.scheduled_state,
        &b.scheduled_state,
        text,
    );
}

pub(crate) fn compare_controller_service<'a>(
    a: &'a ControllerService,
    b: &'a ControllerService,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (
        Component::ControllerService(a),
        Component::ControllerService(b),
    );
    compare_common(out, pair, (&a.name, &b.name), (&a.comments, &b.comments), None);
    push_if_changed(out, DifferenceType::BundleChanged, pair, &a.bundle, &b.bundle, |v| {
        v.clone().map(DiffValue::Bundle)
    });
    compare_properties(
        out,
        pair,
        (&a.properties, &b.properties),
        (&a.property_descriptors, &b.property_descriptors),
    );
    push_if_changed(
        out,
        DifferenceType::BulletinLevelChanged,
        pair,
        &a.bulletin_level,
        &b.bulletin_level,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::ScheduledStateChanged,
        pair,
        &a.scheduled_state,
        &b.scheduled_state,
        text,
    );
}

type Properties = IndexMap<String, Option<String>>;
type Descriptors = IndexMap<String, PropertyDescriptor>;

/// Walk the union of both property maps in document order and classify each
/// key. Raw values ride along only when neither side marks the key
/// sensitive.
fn compare_properties<'a>(
    out: &mut Vec<FlowDifference<'a>>,
    (component_a, component_b): (Component<'a>, Component<'a>),
    (props_a, props_b): (&Properties, &Properties),
    (desc_a, desc_b): (&Descriptors, &Descriptors),
) {
    let keys: IndexSet<&str> = props_a
        .keys()
        .chain(props_b.keys())
        .map(String::as_str)
        .collect();

    for key in keys {
        let before = props_a.get(key).and_then(Option::as_deref);
        let after = props_b.get(key).and_then(Option::as_deref);

        let kind = match (before, after) {
            (None, None) => continue,
            (Some(x), Some(y)) if x == y => continue,
            (None, Some(value)) if references_parameter(value) => {
                DifferenceType::PropertyParameterized
            }
            (None, Some(_)) => DifferenceType::PropertyAdded,
            (Some(value), None) if references_parameter(value) => {
                DifferenceType::PropertyParameterizationRemoved
            }
            (Some(_), None) => DifferenceType::PropertyRemoved,
            (Some(x), Some(y)) => match (references_parameter(x), references_parameter(y)) {
                (false, true) => DifferenceType::PropertyParameterized,
                (true, false) => DifferenceType::PropertyParameterizationRemoved,
                _ => DifferenceType::PropertyChanged,
            },
        };

        let sensitive = is_sensitive(desc_a, key) || is_sensitive(desc_b, key);
        let mut difference =
            FlowDifference::new(kind, Some(component_a), Some(component_b)).with_field(key);
        if !sensitive {
            difference = difference.with_values(before.map(DiffValue::from), after.map(DiffValue::from));
        }
        out.push(difference);
    }
}

fn is_sensitive(descriptors: &Descriptors, key: &str) -> bool {
    descriptors.get(key).is_some_and(|d| d.sensitive)
}

/// Whether a property value contains a parameter reference `#{name}`.
///
/// A run of `#` before `{` escapes pairwise: `##{a}` is the literal text
/// `#{a}`, while `###{a}` is a literal `#` followed by a reference.
#[must_use]
pub fn references_parameter(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'#' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'#' {
            i += 1;
        }
        let hashes = i - start;
        if hashes % 2 == 1 && i < bytes.len() && bytes[i] == b'{' {
            if let Some(end) = value[i + 1..].find('}') {
                if end > 0 {
                    return true;
                }
            }
        }
    }
    false
}
