//! Process group settings. Children are walked by the engine.

use super::{compare_common, integer, push_if_changed, text};
use crate::diff::{DifferenceType, FlowDifference};
use crate::model::{Component, ProcessGroup};

/// Compare the group's own settings. The root group has no position.
pub(crate) fn compare_group_fields<'a>(
    a: &'a ProcessGroup,
    b: &'a ProcessGroup,
    is_root: bool,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (Component::ProcessGroup(a), Component::ProcessGroup(b));
    compare_common(
        out,
        pair,
        (&a.name, &b.name),
        (&a.comments, &b.comments),
        (!is_root).then_some((&a.position, &b.position)),
    );
    push_if_changed(
        out,
        DifferenceType::ParameterContextChanged,
        pair,
        &a.parameter_context_name,
        &b.parameter_context_name,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::FlowfileConcurrencyChanged,
        pair,
        &a.flow_file_concurrency,
        &b.flow_file_concurrency,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::FlowfileOutboundPolicyChanged,
        pair,
        &a.flow_file_outbound_policy,
        &b.flow_file_outbound_policy,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::DefaultFlowfileExpirationChanged,
        pair,
        &a.default_flow_file_expiration,
        &b.default_flow_file_expiration,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::DefaultBackpressureObjectCountChanged,
        pair,
        &a.default_back_pressure_object_threshold,
        &b.default_back_pressure_object_threshold,
        integer,
    );
    push_if_changed(
        out,
        DifferenceType::DefaultBackpressureDataSizeChanged,
        pair,
        &a.default_back_pressure_data_size_threshold,
        &b.default_back_pressure_data_size_threshold,
        text,
    );
}
