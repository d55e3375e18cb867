//! Property-based tests for value redaction and render robustness.
//!
//! Random property and parameter lifecycles are compared and rendered; no
//! value stored under a sensitive key may appear anywhere in the report.

use flow_diff::diff::{DiffValue, DifferenceType, FlowDifference};
use flow_diff::model::{
    Component, FlowSnapshot, Parameter, ParameterContext, ProcessGroup, Processor,
    PropertyDescriptor,
};
use flow_diff::reports::{ParameterContextIndex, ReportAssembler};
use flow_diff::{ComparableFlow, FlowComparator, StandardFlowComparator};
use indexmap::IndexMap;
use proptest::option;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// One key tracked on both sides. Values stored under a sensitive key carry
/// the `SECRET-` prefix, which no plain value can produce. Some values are
/// parameter references such as `#{db}`, so property records also cover the
/// parameterized and parameterization-removed kinds.
#[derive(Debug, Clone)]
struct Slot {
    before: Option<String>,
    after: Option<String>,
    sensitive_before: bool,
    sensitive_after: bool,
}

fn stored_value() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => "[a-z0-9]{8}",
        1 => "[a-z]{2,6}".prop_map(|name| format!("#{{{name}}}")),
    ]
}

fn slot() -> impl Strategy<Value = Slot> {
    (
        option::of(stored_value()),
        option::of(stored_value()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(before, after, sensitive_before, sensitive_after)| {
            let mark = |value: String, sensitive: bool| {
                if sensitive {
                    format!("SECRET-{value}")
                } else {
                    value
                }
            };
            Slot {
                before: before.map(|v| mark(v, sensitive_before)),
                after: after.map(|v| mark(v, sensitive_after)),
                sensitive_before,
                sensitive_after,
            }
        })
}

fn slots() -> impl Strategy<Value = BTreeMap<String, Slot>> {
    prop::collection::btree_map("[a-z]{1,6}( [a-z]{1,6})?", slot(), 0..8)
}

#[derive(Clone, Copy)]
enum Side {
    Before,
    After,
}

impl Slot {
    fn value(&self, side: Side) -> Option<&String> {
        match side {
            Side::Before => self.before.as_ref(),
            Side::After => self.after.as_ref(),
        }
    }

    const fn sensitive(&self, side: Side) -> bool {
        match side {
            Side::Before => self.sensitive_before,
            Side::After => self.sensitive_after,
        }
    }
}

fn processor(id: &str, slots: &BTreeMap<String, Slot>, side: Side) -> Processor {
    Processor {
        identifier: id.to_string(),
        name: Some(format!("Processor {id}")),
        properties: slots
            .iter()
            .filter_map(|(key, slot)| slot.value(side).map(|v| (key.clone(), Some(v.clone()))))
            .collect(),
        property_descriptors: slots
            .iter()
            .map(|(key, slot)| {
                (
                    key.clone(),
                    PropertyDescriptor {
                        name: key.clone(),
                        sensitive: slot.sensitive(side),
                        ..Default::default()
                    },
                )
            })
            .collect(),
        ..Default::default()
    }
}

fn context(slots: &BTreeMap<String, Slot>, side: Side) -> IndexMap<String, ParameterContext> {
    let parameters = slots
        .iter()
        .filter_map(|(name, slot)| {
            slot.value(side).map(|value| Parameter {
                name: name.clone(),
                value: Some(value.clone()),
                sensitive: slot.sensitive(side),
                ..Default::default()
            })
        })
        .collect();
    let mut contexts = IndexMap::new();
    contexts.insert(
        "Secrets".to_string(),
        ParameterContext {
            name: "Secrets".to_string(),
            identifier: Some("Secrets".to_string()),
            parameters,
            ..Default::default()
        },
    );
    contexts
}

fn snapshot(
    properties: &BTreeMap<String, Slot>,
    parameters: &BTreeMap<String, Slot>,
    side: Side,
) -> FlowSnapshot {
    let mut processors = vec![processor("paired", properties, side)];
    match side {
        Side::Before => processors.push(processor("dropped", properties, side)),
        Side::After => processors.push(processor("new", properties, side)),
    }
    FlowSnapshot {
        flow: None,
        snapshot_metadata: None,
        flow_contents: ProcessGroup {
            identifier: "root".to_string(),
            name: Some("Redaction".to_string()),
            parameter_context_name: matches!(side, Side::After).then(|| "Secrets".to_string()),
            processors,
            ..Default::default()
        },
        parameter_contexts: context(parameters, side),
    }
}

fn secrets<'s>(slots: &'s BTreeMap<String, Slot>) -> impl Iterator<Item = &'s String> {
    slots.values().flat_map(|slot| {
        [
            slot.before.as_ref().filter(|_| slot.sensitive_before),
            slot.after.as_ref().filter(|_| slot.sensitive_after),
        ]
        .into_iter()
        .flatten()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sensitive_values_never_rendered(properties in slots(), parameters in slots()) {
        let before = snapshot(&properties, &parameters, Side::Before);
        let after = snapshot(&properties, &parameters, Side::After);

        let comparison = StandardFlowComparator::new()
            .compare(
                &ComparableFlow::from_snapshot("before", &before),
                &ComparableFlow::from_snapshot("after", &after),
            )
            .expect("compare");
        let index = ParameterContextIndex::build(&after.parameter_contexts);
        let report = ReportAssembler::new(&index).assemble(before.flow_name(), comparison.differences());
        let text = report.to_text();

        prop_assert!(!report.has_failures(), "unexpected failures: {:?}", report.failures);
        for secret in secrets(&properties).chain(secrets(&parameters)) {
            prop_assert!(!text.contains(secret.as_str()), "leaked {} in:\n{}", secret, text);
        }
    }

    #[test]
    fn every_difference_yields_at_least_one_line(
        kinds in prop::collection::vec(0usize..64, 1..16),
        field in option::of("[a-zA-Z ]{0,12}"),
        value_a in option::of("\\PC{0,20}"),
        value_b in option::of("\\PC{0,20}"),
    ) {
        let known = DifferenceType::known();
        let p = Processor {
            identifier: "p1".to_string(),
            ..Default::default()
        };
        let differences: Vec<FlowDifference<'_>> = kinds
            .iter()
            .map(|i| {
                let kind = known
                    .get(*i)
                    .cloned()
                    .unwrap_or_else(|| DifferenceType::Unrecognized(format!("KIND_{i}")));
                let mut d = FlowDifference::new(
                    kind,
                    Some(Component::Processor(&p)),
                    Some(Component::Processor(&p)),
                )
                .with_values(
                    value_a.clone().map(DiffValue::Text),
                    value_b.clone().map(DiffValue::Text),
                );
                if let Some(field) = &field {
                    d = d.with_field(field.clone());
                }
                d
            })
            .collect();

        let index = ParameterContextIndex::empty();
        let report = ReportAssembler::new(&index).assemble("Fuzz", &differences);

        prop_assert!(report.lines.len() >= differences.len());
        prop_assert_eq!(report.difference_count, differences.len());
        prop_assert_eq!(report.kind_counts.values().sum::<usize>(), differences.len());
    }
}
