//! Connection comparison.

use super::{compare_common, integer, push_if_changed, strings, text};
use crate::diff::{DiffValue, DifferenceType, FlowDifference};
use crate::model::{Component, Connection};

pub(crate) fn compare_connection<'a>(
    a: &'a Connection,
    b: &'a Connection,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (Component::Connection(a), Component::Connection(b));
    compare_common(out, pair, (&a.name, &b.name), (&a.comments, &b.comments), None);

    // endpoints match on identifier only
    if a.source.id != b.source.id {
        out.push(
            FlowDifference::new(DifferenceType::SourceChanged, Some(pair.0), Some(pair.1))
                .with_values(
                    Some(DiffValue::Connectable(a.source.clone())),
                    Some(DiffValue::Connectable(b.source.clone())),
                ),
        );
    }
    if a.destination.id != b.destination.id {
        out.push(
            FlowDifference::new(DifferenceType::DestinationChanged, Some(pair.0), Some(pair.1))
                .with_values(
                    Some(DiffValue::Connectable(a.destination.clone())),
                    Some(DiffValue::Connectable(b.destination.clone())),
                ),
        );
    }

    push_if_changed(
        out,
        DifferenceType::SelectedRelationshipsChanged,
        pair,
        &a.selected_relationships,
        &b.selected_relationships,
        |v| strings(v),
    );
    push_if_changed(
        out,
        DifferenceType::BackpressureObjectThresholdChanged,
        pair,
        &a.back_pressure_object_threshold,
        &b.back_pressure_object_threshold,
        integer,
    );
    push_if_changed(
        out,
        DifferenceType::BackpressureDataSizeThresholdChanged,
        pair,
        &a.back_pressure_data_size_threshold,
        &b.back_pressure_data_size_threshold,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::FlowfileExpirationChanged,
        pair,
        &a.flow_file_expiration,
        &b.flow_file_expiration,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::PrioritizersChanged,
        pair,
        &a.prioritizers,
        &b.prioritizers,
        |v| strings(v),
    );
    push_if_changed(
        out,
        DifferenceType::LoadBalanceStrategyChanged,
        pair,
        &a.load_balance_strategy,
        &b.load_balance_strategy,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::PartitioningAttributeChanged,
        pair,
        &a.partitioning_attribute,
        &b.partitioning_attribute,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::LoadBalanceCompressionChanged,
        pair,
        &a.load_balance_compression,
        &b.load_balance_compression,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::BendpointsChanged,
        pair,
        &a.bends,
        &b.bends,
        |v| Some(DiffValue::Positions(v.clone())),
    );
}
