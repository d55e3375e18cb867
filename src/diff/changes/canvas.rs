//! Ports, funnels, labels and remote process groups.

use super::{compare_common, integer, push_if_changed, text};
use crate::diff::{DiffValue, DifferenceType, FlowDifference};
use crate::model::{Component, Funnel, Label, Port, RemoteProcessGroup};

pub(crate) fn compare_port<'a>(a: &'a Port, b: &'a Port, out: &mut Vec<FlowDifference<'a>>) {
    let pair = (Component::Port(a), Component::Port(b));
    compare_common(
        out,
        pair,
        (&a.name, &b.name),
        (&a.comments, &b.comments),
        Some((&a.position, &b.position)),
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
        DifferenceType::ScheduledStateChanged,
        pair,
        &a.scheduled_state,
        &b.scheduled_state,
        text,
    );
}

pub(crate) fn compare_funnel<'a>(a: &'a Funnel, b: &'a Funnel, out: &mut Vec<FlowDifference<'a>>) {
    push_if_changed(
        out,
        DifferenceType::PositionChanged,
        (Component::Funnel(a), Component::Funnel(b)),
        &a.position,
        &b.position,
        |p| p.map(DiffValue::Position),
    );
}

pub(crate) fn compare_label<'a>(a: &'a Label, b: &'a Label, out: &mut Vec<FlowDifference<'a>>) {
    let pair = (Component::Label(a), Component::Label(b));
    push_if_changed(out, DifferenceType::PositionChanged, pair, &a.position, &b.position, |p| {
        p.map(DiffValue::Position)
    });
    push_if_changed(out, DifferenceType::LabelValueChanged, pair, &a.label, &b.label, text);
    push_if_changed(
        out,
        DifferenceType::SizeChanged,
        pair,
        &(a.width, a.height),
        &(b.width, b.height),
        |(width, height)| {
            Some(DiffValue::Size {
                width: width.unwrap_or_default(),
                height: height.unwrap_or_default(),
            })
        },
    );
}

pub(crate) fn compare_remote_group<'a>(
    a: &'a RemoteProcessGroup,
    b: &'a RemoteProcessGroup,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (
        Component::RemoteProcessGroup(a),
        Component::RemoteProcessGroup(b),
    );
    compare_common(
        out,
        pair,
        (&a.name, &b.name),
        (&a.comments, &b.comments),
        Some((&a.position, &b.position)),
    );
    push_if_changed(
        out,
        DifferenceType::RpgUrlChanged,
        pair,
        &a.target_uris,
        &b.target_uris,
        text,
    );
}
