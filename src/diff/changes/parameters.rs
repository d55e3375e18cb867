//! Parameter context comparison. Contexts are matched by name.

use super::{match_by_id, push_if_changed, strings, text};
use crate::diff::{DiffValue, DifferenceType, FlowDifference};
use crate::model::{Component, ParameterContext};
use indexmap::IndexMap;

pub(crate) fn compare_parameter_contexts<'a>(
    a: &'a IndexMap<String, ParameterContext>,
    b: &'a IndexMap<String, ParameterContext>,
    out: &mut Vec<FlowDifference<'a>>,
) {
    for (name, context) in a {
        match b.get(name) {
            Some(other) => compare_context(context, other, out),
            None => out.push(FlowDifference::removed(Component::ParameterContext(context))),
        }
    }
    for (name, context) in b {
        if !a.contains_key(name) {
            out.push(FlowDifference::added(Component::ParameterContext(context)));
        }
    }
}

fn compare_context<'a>(
    a: &'a ParameterContext,
    b: &'a ParameterContext,
    out: &mut Vec<FlowDifference<'a>>,
) {
    let pair = (Component::ParameterContext(a), Component::ParameterContext(b));
    push_if_changed(
        out,
        DifferenceType::DescriptionChanged,
        pair,
        &a.description,
        &b.description,
        text,
    );
    push_if_changed(
        out,
        DifferenceType::InheritedContextsChanged,
        pair,
        &a.inherited_parameter_contexts,
        &b.inherited_parameter_contexts,
        |v| strings(v),
    );

    let matched = match_by_id(&a.parameters, &b.parameters, |p| p.name.as_str());
    for parameter in matched.removed {
        out.push(
            FlowDifference::new(DifferenceType::ParameterRemoved, Some(pair.0), Some(pair.1))
                .with_field(&parameter.name),
        );
    }
    for (before, after) in matched.paired {
        if before.value != after.value || before.sensitive != after.sensitive {
            let mut difference =
                FlowDifference::new(DifferenceType::ParameterValueChanged, Some(pair.0), Some(pair.1))
                    .with_field(&after.name);
            if !before.sensitive && !after.sensitive {
                difference = difference.with_values(text(&before.value), text(&after.value));
            }
            out.push(difference);
        }
        if before.description != after.description {
            out.push(
                FlowDifference::new(
                    DifferenceType::ParameterDescriptionChanged,
                    Some(pair.0),
                    Some(pair.1),
                )
                .with_field(&after.name)
                .with_values(text(&before.description), text(&after.description)),
            );
        }
    }
    for parameter in matched.added {
        let mut difference =
            FlowDifference::new(DifferenceType::ParameterAdded, Some(pair.0), Some(pair.1))
                .with_field(&parameter.name);
        if !parameter.sensitive {
            difference = difference.with_values(None, parameter.value.clone().map(DiffValue::Text));
        }
        out.push(difference);
    }
}
