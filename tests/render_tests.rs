//! Renderer and assembler tests over hand-built difference records.

use flow_diff::diff::{DiffValue, DifferenceType, FlowDifference};
use flow_diff::model::{
    Component, ConnectableComponent, Connection, ControllerService, Funnel, Parameter,
    ParameterContext, Port, PortType, ProcessGroup, Processor, PropertyDescriptor,
};
use flow_diff::reports::{DifferenceRenderer, ParameterContextIndex, ReportAssembler};
use flow_diff::{parse_snapshot_str, ComparableFlow, FlowComparator, StandardFlowComparator};
use indexmap::IndexMap;

// ============================================================================
// Builders
// ============================================================================

fn processor(id: &str, name: &str, props: &[(&str, &str, bool)]) -> Processor {
    Processor {
        identifier: id.to_string(),
        name: Some(name.to_string()),
        properties: props
            .iter()
            .map(|(k, v, _)| ((*k).to_string(), Some((*v).to_string())))
            .collect(),
        property_descriptors: props
            .iter()
            .map(|(k, _, sensitive)| {
                (
                    (*k).to_string(),
                    PropertyDescriptor {
                        name: (*k).to_string(),
                        sensitive: *sensitive,
                        ..Default::default()
                    },
                )
            })
            .collect(),
        ..Default::default()
    }
}

fn endpoint(id: &str, name: &str) -> ConnectableComponent {
    ConnectableComponent {
        id: id.to_string(),
        connectable_type: Some("PROCESSOR".to_string()),
        group_id: Some("root".to_string()),
        name: Some(name.to_string()),
    }
}

fn connection() -> Connection {
    Connection {
        identifier: "c1".to_string(),
        source: endpoint("p1", "ListenHTTP"),
        destination: endpoint("p2", "RouteOnAttribute"),
        selected_relationships: ["success".to_string()].into_iter().collect(),
        ..Default::default()
    }
}

/// A record carrying the same component on both sides.
fn changed<'a>(kind: DifferenceType, component: Component<'a>) -> FlowDifference<'a> {
    FlowDifference::new(kind, Some(component), Some(component))
}

fn render_all(differences: &[FlowDifference<'_>]) -> String {
    differences.iter().map(render).collect::<Vec<_>>().join("\n")
}

fn render_with(index: &ParameterContextIndex<'_>, d: &FlowDifference<'_>) -> String {
    DifferenceRenderer::new(index)
        .render(d)
        .expect("render should succeed")
        .join("\n")
}

fn render(d: &FlowDifference<'_>) -> String {
    render_with(&ParameterContextIndex::empty(), d)
}

// ============================================================================
// Component lifecycle
// ============================================================================

#[test]
fn unnamed_self_loop_uses_relationship_label() {
    let connection = Connection {
        identifier: "c1".to_string(),
        source: endpoint("p1", "RouteOnAttribute"),
        destination: endpoint("p1", "RouteOnAttribute"),
        selected_relationships: ["success".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let d = FlowDifference::added(Component::Connection(&connection));

    insta::assert_snapshot!(render(&d), @"- A self-loop connection `[success]` has been added on `RouteOnAttribute`");
}

#[test]
fn added_processor_lists_configuration_in_document_order() {
    let p = processor(
        "p1",
        "PutSFTP",
        &[
            ("Hostname", "sftp.internal", false),
            ("Password", "hunter2", true),
            ("Remote Path", "/inbound", false),
        ],
    );
    let d = FlowDifference::added(Component::Processor(&p));

    insta::assert_snapshot!(render(&d), @r"
- A Processor named `PutSFTP` has been added with the below configuration
  - `Hostname` = `sftp.internal`
  - `Password` = `<Sensitive Value>`
  - `Remote Path` = `/inbound`
");
}

#[test]
fn controller_service_lifecycle() {
    let service = ControllerService {
        identifier: "cs1".to_string(),
        name: Some("DBCPConnectionPool".to_string()),
        properties: [
            ("Database Connection URL", "jdbc:postgresql://db/orders"),
            ("Password", "hunter2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect(),
        property_descriptors: [("Database Connection URL", false), ("Password", true)]
            .into_iter()
            .map(|(k, sensitive)| {
                (
                    k.to_string(),
                    PropertyDescriptor {
                        name: k.to_string(),
                        sensitive,
                        ..Default::default()
                    },
                )
            })
            .collect(),
        ..Default::default()
    };
    let bare = ControllerService {
        identifier: "cs2".to_string(),
        name: Some("JsonTreeReader".to_string()),
        ..Default::default()
    };

    insta::assert_snapshot!(render_all(&[
        FlowDifference::added(Component::ControllerService(&service)),
        FlowDifference::removed(Component::ControllerService(&bare)),
    ]), @r"
- A Controller Service named `DBCPConnectionPool` has been added with the below configuration
  - `Database Connection URL` = `jdbc:postgresql://db/orders`
  - `Password` = `<Sensitive Value>`
- A Controller Service named `JsonTreeReader` has been removed
");
}

#[test]
fn rename_and_move() {
    let p = processor("p1", "FetchOrders", &[]);
    let port_before = Port {
        identifier: "in1".to_string(),
        name: Some("in".to_string()),
        port_type: PortType::InputPort,
        ..Default::default()
    };
    let port_after = Port {
        name: Some("records".to_string()),
        ..port_before.clone()
    };
    let funnel = Funnel {
        identifier: "f1".to_string(),
        position: None,
    };

    insta::assert_snapshot!(render_all(&[
        changed(DifferenceType::NameChanged, Component::Processor(&p))
            .with_values(Some("FetchOrders".into()), Some("FetchAllOrders".into())),
        FlowDifference::new(
            DifferenceType::NameChanged,
            Some(Component::Port(&port_before)),
            Some(Component::Port(&port_after)),
        ),
        changed(DifferenceType::PositionChanged, Component::Processor(&p)),
        changed(DifferenceType::PositionChanged, Component::Funnel(&funnel)),
    ]), @r"
- A Processor has been renamed from `FetchOrders` to `FetchAllOrders`
- An Input Port has been renamed from `in` to `records`
- A Processor named `FetchOrders` has been moved to another position
- A Funnel has been moved to another position
");
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn sensitive_property_added_is_redacted() {
    let before = processor("p1", "PutSFTP", &[]);
    let after = processor("p1", "PutSFTP", &[("Password", "hunter2", true)]);
    let d = FlowDifference::new(
        DifferenceType::PropertyAdded,
        Some(Component::Processor(&before)),
        Some(Component::Processor(&after)),
    )
    .with_field("Password");

    insta::assert_snapshot!(render(&d), @"- In the Processor named `PutSFTP`, a property has been added: `Password` = `<Sensitive Value>`");
}

#[test]
fn property_changed_redacts_when_sensitivity_flips() {
    let before = processor("p1", "InvokeHTTP", &[("Token", "plain-token", false)]);
    let after = processor("p1", "InvokeHTTP", &[("Token", "secret-token", true)]);
    let d = FlowDifference::new(
        DifferenceType::PropertyChanged,
        Some(Component::Processor(&before)),
        Some(Component::Processor(&after)),
    )
    .with_field("Token")
    .with_values(Some("plain-token".into()), Some("secret-token".into()));

    let text = render(&d);
    assert_eq!(
        text,
        "- In the Processor named `InvokeHTTP`, the value of the property `Token` changed from `<Sensitive Value>` to `<Sensitive Value>`"
    );
}

#[test]
fn parameter_reference_lifecycle() {
    let before = processor("p1", "PutDatabaseRecord", &[("Host", "db.local", false)]);
    let after = processor(
        "p1",
        "PutDatabaseRecord",
        &[("Host", "#{db.host}", false), ("Password", "#{db.password}", true)],
    );
    let between = |kind: DifferenceType, field: &str| {
        FlowDifference::new(
            kind,
            Some(Component::Processor(&before)),
            Some(Component::Processor(&after)),
        )
        .with_field(field)
    };

    insta::assert_snapshot!(render_all(&[
        between(DifferenceType::PropertyParameterized, "Host"),
        between(DifferenceType::PropertyParameterized, "Password"),
        between(DifferenceType::PropertyParameterizationRemoved, "Host"),
        between(DifferenceType::PropertyRemoved, "Proxy Host"),
    ]), @r"
- In the Processor named `PutDatabaseRecord`, a property is now referencing a parameter: `Host` = `#{db.host}`
- In the Processor named `PutDatabaseRecord`, a property is now referencing a parameter: `Password` = `<Sensitive Value>`
- In the Processor named `PutDatabaseRecord`, the property `Host` is no longer referencing a parameter
- In the Processor named `PutDatabaseRecord`, the property `Proxy Host` has been removed
");
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn concurrent_tasks_direction() {
    let p = processor("p1", "ConsumeKafka", &[]);
    let changed = |a: i64, b: i64| {
        FlowDifference::new(
            DifferenceType::ConcurrentTasksChanged,
            Some(Component::Processor(&p)),
            Some(Component::Processor(&p)),
        )
        .with_values(Some(DiffValue::Integer(a)), Some(DiffValue::Integer(b)))
    };

    insta::assert_snapshot!(render(&changed(1, 4)), @"- In the Processor named `ConsumeKafka`, the number of concurrent tasks has been increased from `1` to `4`");
    insta::assert_snapshot!(render(&changed(8, 2)), @"- In the Processor named `ConsumeKafka`, the number of concurrent tasks has been decreased from `8` to `2`");
}

#[test]
fn concurrent_tasks_accepts_numeric_text() {
    let p = processor("p1", "ConsumeKafka", &[]);
    let d = FlowDifference::new(
        DifferenceType::ConcurrentTasksChanged,
        Some(Component::Processor(&p)),
        Some(Component::Processor(&p)),
    )
    .with_values(Some("3".into()), Some(" 2 ".into()));

    assert!(render(&d).contains("decreased from `3` to `2`"));
}

#[test]
fn scheduling_field_changes() {
    let p = processor("p1", "ConsumeKafka", &[]);
    let field = |kind: DifferenceType, a: Option<DiffValue>, b: Option<DiffValue>| {
        changed(kind, Component::Processor(&p)).with_values(a, b)
    };

    insta::assert_snapshot!(render_all(&[
        field(DifferenceType::RunScheduleChanged, None, Some("30 sec".into())),
        field(
            DifferenceType::RunDurationChanged,
            Some(DiffValue::Integer(0)),
            Some(DiffValue::Integer(25)),
        ),
        field(DifferenceType::PenaltyDurationChanged, Some("30 sec".into()), Some("1 min".into())),
        field(DifferenceType::YieldDurationChanged, Some("1 sec".into()), Some("5 sec".into())),
        field(
            DifferenceType::SchedulingStrategyChanged,
            Some("TIMER_DRIVEN".into()),
            Some("CRON_DRIVEN".into()),
        ),
        field(DifferenceType::ScheduledStateChanged, Some("RUNNING".into()), Some("DISABLED".into())),
        field(DifferenceType::BulletinLevelChanged, Some("WARN".into()), Some("ERROR".into())),
        field(
            DifferenceType::AutoTerminatedRelationshipsChanged,
            Some(DiffValue::Strings(Vec::new())),
            Some(DiffValue::Strings(vec!["failure".to_string(), "retry".to_string()])),
        ),
    ]), @r"
- In the Processor named `ConsumeKafka`, the Run Schedule changed from `<no value>` to `30 sec`
- In the Processor named `ConsumeKafka`, the Run Duration changed from `0` to `25`
- In the Processor named `ConsumeKafka`, the penalty duration changed from `30 sec` to `1 min`
- In the Processor named `ConsumeKafka`, the yield duration changed from `1 sec` to `5 sec`
- In the Processor named `ConsumeKafka`, the Scheduling Strategy changed from `TIMER_DRIVEN` to `CRON_DRIVEN`
- In the Processor named `ConsumeKafka`, the Schedule State changed from `RUNNING` to `DISABLED`
- In the Processor named `ConsumeKafka`, the bulletin level changed from `WARN` to `ERROR`
- In the Processor named `ConsumeKafka`, the list of auto-terminated relationships changed from `[]` to `[failure, retry]`
");
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn connection_routing_changes() {
    let c = connection();

    insta::assert_snapshot!(render_all(&[
        changed(DifferenceType::DestinationChanged, Component::Connection(&c)).with_values(
            Some(DiffValue::Connectable(endpoint("p2", "RouteOnAttribute"))),
            Some(DiffValue::Connectable(endpoint("p3", "PutFile"))),
        ),
        changed(DifferenceType::BendpointsChanged, Component::Connection(&c)),
    ]), @r"
- The destination of the connection `[success]` from `ListenHTTP` has changed from `RouteOnAttribute` to `PutFile`
- The bending points for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` have been changed
");
}

#[test]
fn connection_settings() {
    let c = connection();
    let setting = |kind: DifferenceType, a: DiffValue, b: DiffValue| {
        changed(kind, Component::Connection(&c)).with_values(Some(a), Some(b))
    };

    insta::assert_snapshot!(render_all(&[
        setting(
            DifferenceType::BackpressureDataSizeThresholdChanged,
            "1 GB".into(),
            "2 GB".into(),
        ),
        setting(
            DifferenceType::BackpressureObjectThresholdChanged,
            DiffValue::Integer(10000),
            DiffValue::Integer(20000),
        ),
        setting(
            DifferenceType::LoadBalanceStrategyChanged,
            "DO_NOT_LOAD_BALANCE".into(),
            "ROUND_ROBIN".into(),
        ),
        setting(
            DifferenceType::LoadBalanceCompressionChanged,
            "DO_NOT_COMPRESS".into(),
            "COMPRESS_ATTRIBUTES_ONLY".into(),
        ),
        setting(DifferenceType::FlowfileExpirationChanged, "0 sec".into(), "1 hour".into()),
    ]), @r"
- The data size backpressure threshold for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` has been changed from `1 GB` to `2 GB`
- The flowfile number backpressure threshold for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` has been changed from `10000` to `20000`
- The load balancing strategy for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` has been changed from `DO_NOT_LOAD_BALANCE` to `ROUND_ROBIN`
- The load balancing compression for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` has been changed from `DO_NOT_COMPRESS` to `COMPRESS_ATTRIBUTES_ONLY`
- The flow file expiration for the connection `[success]` from `ListenHTTP` to `RouteOnAttribute` has been changed from `0 sec` to `1 hour`
");
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn unmodeled_kind_falls_back_to_record_dump() {
    let context = ParameterContext {
        name: "Database".to_string(),
        identifier: Some("Database".to_string()),
        ..Default::default()
    };
    let d = FlowDifference::new(
        DifferenceType::DescriptionChanged,
        Some(Component::ParameterContext(&context)),
        Some(Component::ParameterContext(&context)),
    )
    .with_values(Some("Primary store".into()), None);

    insta::assert_snapshot!(render(&d), @r"
- Description changed in Parameter Context `Database` (DESCRIPTION_CHANGED)
  - Value A: Primary store
  - Value B: <none>
  - Component A: Parameter Context[id=Database, name=Database]
  - Component B: Parameter Context[id=Database, name=Database]
  - Field: <none>
");
}

#[test]
fn unrecognized_kind_name_is_preserved() {
    let group = ProcessGroup {
        identifier: "g1".to_string(),
        name: Some("Orders".to_string()),
        ..Default::default()
    };
    let kind: DifferenceType = "VERSIONED_FLOW_COORDINATES_CHANGED"
        .parse()
        .unwrap_or_else(|e| match e {});
    let d = FlowDifference::new(kind, Some(Component::ProcessGroup(&group)), None);

    let text = render(&d);
    assert!(text.starts_with(
        "- Unrecognized difference in Process Group `Orders` (VERSIONED_FLOW_COORDINATES_CHANGED)"
    ));
    assert!(text.contains("  - Component B: <none>"));
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn context_binding_lists_sorted_parameters_from_index() {
    let mut contexts = IndexMap::new();
    contexts.insert(
        "Kafka".to_string(),
        ParameterContext {
            name: "Kafka".to_string(),
            identifier: Some("Kafka".to_string()),
            parameters: vec![
                Parameter::sensitive("sasl.password", Some("p@ss")),
                Parameter::new("brokers", Some("kafka:9092")),
                Parameter::new("group.id", None),
            ],
            ..Default::default()
        },
    );
    let index = ParameterContextIndex::build(&contexts);

    let group = ProcessGroup {
        identifier: "g1".to_string(),
        name: Some("Streaming".to_string()),
        parameter_context_name: Some("Kafka".to_string()),
        ..Default::default()
    };
    let d = FlowDifference::new(
        DifferenceType::ParameterContextChanged,
        Some(Component::ProcessGroup(&group)),
        Some(Component::ProcessGroup(&group)),
    )
    .with_values(None, Some("Kafka".into()));

    insta::assert_snapshot!(render_with(&index, &d), @"- The parameter context `Kafka` with parameters `brokers=kafka:9092, group.id=<no value>, sasl.password=<Sensitive Value>` has been added to the process group `Streaming`");
}

#[test]
fn parameter_context_sentences() {
    let context = ParameterContext {
        name: "Database".to_string(),
        identifier: Some("Database".to_string()),
        ..Default::default()
    };
    let group = ProcessGroup {
        identifier: "g1".to_string(),
        name: Some("Streaming".to_string()),
        ..Default::default()
    };

    insta::assert_snapshot!(render_all(&[
        changed(DifferenceType::ParameterRemoved, Component::ParameterContext(&context))
            .with_field("schema"),
        changed(DifferenceType::InheritedContextsChanged, Component::ParameterContext(&context))
            .with_values(
                Some(DiffValue::Strings(vec!["Base".to_string()])),
                Some(DiffValue::Strings(vec!["Base".to_string(), "Kafka".to_string()])),
            ),
        changed(DifferenceType::ParameterContextChanged, Component::ProcessGroup(&group))
            .with_values(Some("Kafka".into()), None),
    ]), @r"
- In the Parameter Context `Database` the parameter `schema` has been removed
- In the Parameter Context `Database`, the list of inherited parameter contexts changed from `[Base]` to `[Base, Kafka]`
- The parameter context `Kafka` has been removed from the process group `Streaming`
");
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn rendering_is_idempotent() {
    let p = processor("p1", "PutSFTP", &[("Password", "hunter2", true)]);
    let differences = vec![
        FlowDifference::added(Component::Processor(&p)),
        FlowDifference::new(
            DifferenceType::PropertyRemoved,
            Some(Component::Processor(&p)),
            Some(Component::Processor(&p)),
        )
        .with_field("Proxy Host"),
    ];

    let index = ParameterContextIndex::empty();
    let assembler = ReportAssembler::new(&index);
    let first = assembler.assemble("Ingest", &differences);
    let second = assembler.assemble("Ingest", &differences);

    assert_eq!(first.to_text(), second.to_text());
    assert_eq!(first.kind_counts, second.kind_counts);
}

#[test]
fn one_bad_record_does_not_stop_the_report() {
    let p = processor("p1", "PutSFTP", &[]);
    let differences = vec![
        FlowDifference::new(
            DifferenceType::PropertyChanged,
            Some(Component::Processor(&p)),
            Some(Component::Processor(&p)),
        ),
        FlowDifference::removed(Component::Processor(&p)),
    ];

    let index = ParameterContextIndex::empty();
    let report = ReportAssembler::new(&index).assemble("Ingest", &differences);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, "PROPERTY_CHANGED");
    assert_eq!(
        report.lines,
        vec![
            "- [render error] PROPERTY_CHANGED: no field name".to_string(),
            "- A Processor named `PutSFTP` has been removed".to_string(),
        ]
    );
}

#[test]
fn self_comparison_renders_header_only() {
    let content = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/orders-v1.json"
    ))
    .expect("fixture");
    let snapshot = parse_snapshot_str(&content).expect("parse");

    let comparison = StandardFlowComparator::new()
        .compare(
            &ComparableFlow::from_snapshot("before", &snapshot),
            &ComparableFlow::from_snapshot("after", &snapshot),
        )
        .expect("compare");
    let index = ParameterContextIndex::build(&snapshot.parameter_contexts);
    let report = ReportAssembler::new(&index).assemble(snapshot.flow_name(), comparison.differences());

    insta::assert_snapshot!(report.to_text(), @r"
## Flow Diff
### Executing Flow Diff for flow: `Ingest`
");
}
