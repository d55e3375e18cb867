#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the snapshot loader, then diff and render the result against itself
/// and against an empty flow.
fuzz_target!(|data: &[u8]| {
    use flow_diff::reports::{ParameterContextIndex, ReportAssembler};
    use flow_diff::{ComparableFlow, FlowComparator, StandardFlowComparator};

    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = flow_diff::parse_snapshot_str(s) else {
        return;
    };
    let Ok(empty) = flow_diff::parse_snapshot_str(r#"{ "flowContents": { "identifier": "root" } }"#)
    else {
        return;
    };

    let comparator = StandardFlowComparator::new();
    for (a, b) in [(&snapshot, &snapshot), (&empty, &snapshot), (&snapshot, &empty)] {
        if let Ok(comparison) = comparator.compare(
            &ComparableFlow::from_snapshot("a", a),
            &ComparableFlow::from_snapshot("b", b),
        ) {
            let index = ParameterContextIndex::build(&b.parameter_contexts);
            let _ = ReportAssembler::new(&index).assemble(a.flow_name(), comparison.differences());
        }
    }
});
