//! Per-component change detection.
//!
//! Each submodule compares one family of matched components and appends
//! [`FlowDifference`] records in a fixed field order, so a given pair of
//! flows always yields the same sequence.

mod canvas;
mod connections;
mod groups;
mod parameters;
mod processors;

pub(crate) use canvas::{compare_funnel, compare_label, compare_port, compare_remote_group};
pub(crate) use connections::compare_connection;
pub(crate) use groups::compare_group_fields;
pub(crate) use parameters::compare_parameter_contexts;
pub(crate) use processors::{compare_controller_service, compare_processor};
pub use processors::references_parameter;

use super::{DiffValue, DifferenceType, FlowDifference};
use crate::model::{Component, Position};
use std::collections::{HashMap, HashSet};

/// Components of one kind split into matched pairs and one-sided leftovers.
pub(crate) struct Matched<'a, T> {
    pub removed: Vec<&'a T>,
    pub paired: Vec<(&'a T, &'a T)>,
    pub added: Vec<&'a T>,
}

/// Match two component lists by identifier, keeping side A's order for
/// pairs and removals and side B's order for additions.
pub(crate) fn match_by_id<'a, T>(a: &'a [T], b: &'a [T], id: impl Fn(&T) -> &str) -> Matched<'a, T> {
    let b_index: HashMap<&str, &T> = b.iter().map(|item| (id(item), item)).collect();
    let a_ids: HashSet<&str> = a.iter().map(|item| id(item)).collect();

    let mut removed = Vec::new();
    let mut paired = Vec::new();
    for item in a {
        match b_index.get(id(item)) {
            Some(other) => paired.push((item, *other)),
            None => removed.push(item),
        }
    }
    let added = b.iter().filter(|item| !a_ids.contains(id(item))).collect();

    Matched {
        removed,
        paired,
        added,
    }
}

/// Append a field-change record when `before != after`.
pub(crate) fn push_if_changed<'a, T: PartialEq + ?Sized>(
    out: &mut Vec<FlowDifference<'a>>,
    kind: DifferenceType,
    (a, b): (Component<'a>, Component<'a>),
    before: &T,
    after: &T,
    to_value: impl Fn(&T) -> Option<DiffValue>,
) {
    if before != after {
        out.push(
            FlowDifference::new(kind, Some(a), Some(b)).with_values(to_value(before), to_value(after)),
        );
    }
}

pub(crate) fn text(value: &Option<String>) -> Option<DiffValue> {
    value.clone().map(DiffValue::Text)
}

pub(crate) fn integer(value: &Option<i64>) -> Option<DiffValue> {
    value.map(DiffValue::Integer)
}

pub(crate) fn strings<'s, I>(values: I) -> Option<DiffValue>
where
    I: IntoIterator<Item = &'s String>,
{
    Some(DiffValue::Strings(values.into_iter().cloned().collect()))
}

/// Name, comments and (optionally) position, shared by every nameable
/// component.
pub(crate) fn compare_common<'a>(
    out: &mut Vec<FlowDifference<'a>>,
    pair: (Component<'a>, Component<'a>),
    names: (&Option<String>, &Option<String>),
    comments: (&Option<String>, &Option<String>),
    positions: Option<(&Option<Position>, &Option<Position>)>,
) {
    push_if_changed(out, DifferenceType::NameChanged, pair, names.0, names.1, text);
    push_if_changed(
        out,
        DifferenceType::CommentsChanged,
        pair,
        comments.0,
        comments.1,
        text,
    );
    if let Some((before, after)) = positions {
        push_if_changed(out, DifferenceType::PositionChanged, pair, before, after, |p| {
            p.map(DiffValue::Position)
        });
    }
}
