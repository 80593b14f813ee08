//! Report driver and print command tests

#[path = "testutils/mod.rs"]
mod testutils;

use pgprint::format::DEPTH_MARKER;
use pgprint::{
    render_report, DispatchTable, Formatter, Handle, InspectConfig, InspectError, PrintCommand,
    Report, SnapshotMemory, Value,
};
use testutils::snapshot_fixture::{null, ptr, SnapshotFixture};

fn command<'a>(mem: &'a SnapshotMemory, config: InspectConfig) -> PrintCommand<'a> {
    PrintCommand::new(mem, mem, DispatchTable::global(), config)
}

#[test]
fn test_wrong_argument_count_is_usage() {
    let fx = SnapshotFixture::new();
    let cmd = command(fx.memory(), InspectConfig::default());

    for args in ["", "   ", "plan extra", "a b c"] {
        assert_eq!(
            cmd.invoke(args).unwrap(),
            Report::Usage("usage: pgprint var".to_string()),
            "args: {:?}",
            args
        );
    }
}

#[test]
fn test_argument_quoting() {
    let mut fx = SnapshotFixture::new();
    let one = fx.integer(1);
    fx.symbol("one", one);
    let cmd = command(fx.memory(), InspectConfig::default());

    assert_eq!(cmd.invoke("'one'").unwrap(), Report::Rendered("Integer: 1".to_string()));
    assert_eq!(cmd.invoke("\"(Integer *) one\"").unwrap(), Report::Rendered("Integer: 1".to_string()));

    // an unterminated quote is rejected before anything is evaluated
    for args in ["\"one", "'one", "\"(Integer *) one"] {
        assert_eq!(
            cmd.invoke(args).unwrap(),
            Report::Usage("usage: pgprint var".to_string()),
            "args: {:?}",
            args
        );
    }
}

#[test]
fn test_non_node_values() {
    let mut fx = SnapshotFixture::new();
    fx.define("count", Value::Int(3));
    let cell = fx.record("ListCell", vec![("int_value", Value::Int(1))]);
    fx.symbol("cell", cell);

    let cmd = command(fx.memory(), InspectConfig::default());
    assert_eq!(
        cmd.invoke("count").unwrap(),
        Report::NotANode("not a node type".to_string())
    );
    assert_eq!(
        cmd.invoke("cell").unwrap(),
        Report::NotANode("not a node type".to_string())
    );
}

#[test]
fn test_null_handle_renders_sentinel() {
    let mut fx = SnapshotFixture::new();
    fx.symbol("plan", Handle::NULL);

    let cmd = command(fx.memory(), InspectConfig::default());
    assert_eq!(cmd.invoke("plan").unwrap(), Report::Rendered("(NULL)".to_string()));
}

#[test]
fn test_unknown_tag_falls_back_to_name() {
    let mut fx = SnapshotFixture::new();
    let node = fx.node("WindowFunc", vec![("winfnoid", Value::Int(3100))]);
    fx.symbol("wf", node);

    let cmd = command(fx.memory(), InspectConfig::default());
    assert_eq!(cmd.invoke("wf").unwrap(), Report::Rendered("WindowFunc".to_string()));
}

#[test]
fn test_member_chain_and_cast() {
    let mut fx = SnapshotFixture::new();
    let scan = fx.leaf("SeqScan", 7);
    let stmt = fx.node("PlannedStmt", vec![("planTree", ptr(scan))]);
    fx.symbol("stmt", stmt);

    let cmd = command(fx.memory(), InspectConfig::default());
    let report = cmd.invoke("\"(Plan *) stmt->planTree\"").unwrap();
    assert!(report.is_rendered());
    assert!(report.text().starts_with("\t-> SeqScan (cost=0.000...10.500 rows=100 width=4) id=7"));
}

#[test]
fn test_unresolved_expression_is_error() {
    let fx = SnapshotFixture::new();
    let cmd = command(fx.memory(), InspectConfig::default());
    assert!(matches!(
        cmd.invoke("missing"),
        Err(InspectError::Unresolved(_))
    ));
}

#[test]
fn test_render_is_deterministic() {
    let mut fx = SnapshotFixture::new();
    let children: Vec<Handle> = (2..=3).map(|id| fx.leaf("SeqScan", id)).collect();
    let plans = fx.list(&children);
    let append = fx.plan_with("Append", 1, vec![("appendplans", ptr(plans))]);

    let config = InspectConfig::default();
    let value = Value::Handle(append);
    let first = render_report(fx.memory(), DispatchTable::global(), &config, &value).unwrap();
    let second = render_report(fx.memory(), DispatchTable::global(), &config, &value).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_depth_guard_truncates() {
    let mut fx = SnapshotFixture::new();
    let children: Vec<Handle> = (2..=3).map(|id| fx.leaf("SeqScan", id)).collect();
    let plans = fx.list(&children);
    let append = fx.plan_with("Append", 1, vec![("appendplans", ptr(plans))]);

    let unbounded = fx.render(append);
    assert!(unbounded.contains("SeqScan"));
    assert!(!unbounded.contains(DEPTH_MARKER));

    let config = InspectConfig::default().with_max_depth(Some(1));
    let truncated = fx.render_with(append, &config);
    assert!(truncated.starts_with("\t-> Append"));
    assert!(truncated.contains(DEPTH_MARKER));
    assert!(!truncated.contains("SeqScan"));
}

#[test]
fn test_depth_guard_keeps_child_layout() {
    let mut fx = SnapshotFixture::new();
    let scan = fx.leaf("SeqScan", 2);
    let join = fx.plan_with(
        "NestLoop",
        1,
        vec![("lefttree", ptr(scan)), ("joinqual", null())],
    );

    let config = InspectConfig::default().with_max_depth(Some(1));
    let output = fx.render_with(join, &config);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "\t-> NestLoop (cost=0.000...10.500 rows=100 width=4) id=1");
    assert_eq!(lines[lines.len() - 2], format!("\t\t{}", DEPTH_MARKER));
    // a NULL child needs no recursion and keeps its placeholder
    assert_eq!(lines[lines.len() - 1], "\t\t-> (NULL)");
}

#[test]
fn test_list_modes() {
    let mut fx = SnapshotFixture::new();
    let a = fx.integer(1);
    let b = fx.integer(2);
    let list = fx.list(&[a, b]);

    let config = InspectConfig::default();
    let f = Formatter::new(fx.memory(), DispatchTable::global(), &config);
    assert_eq!(f.node_list(list, 0, true).unwrap(), "Integer: 1\nInteger: 2");
    assert_eq!(
        f.node_list(list, 0, false).unwrap(),
        "['Integer: 1', 'Integer: 2']"
    );
    assert_eq!(f.node_list(list, 1, true).unwrap(), "\tInteger: 1\n\tInteger: 2");

    assert_eq!(f.node_list(Handle::NULL, 0, true).unwrap(), "(NIL)");
    assert_eq!(f.node_list(Handle::NULL, 2, true).unwrap(), "\t\t(NIL)");
    assert_eq!(f.int_list(Handle::NULL, 1).unwrap(), "\t(NIL)");
    assert_eq!(f.node_list(Handle::NULL, 0, false).unwrap(), "(NIL)");
    assert_eq!(f.node(Handle::NULL).unwrap(), "(NULL)");
}

#[test]
fn test_list_walker_restarts() {
    use pgprint::format::{Element, ElementKind, ListWalker};

    let mut fx = SnapshotFixture::new();
    let list = fx.int_list(&[4, 5, 6]);

    let walker = ListWalker::new(fx.memory(), list, ElementKind::Int)
        .unwrap()
        .unwrap();
    let first: Vec<Element> = walker.iter().map(|e| e.unwrap()).collect();
    let second: Vec<Element> = walker.iter().map(|e| e.unwrap()).collect();
    assert_eq!(first, vec![Element::Int(4), Element::Int(5), Element::Int(6)]);
    assert_eq!(first, second);

    assert!(ListWalker::new(fx.memory(), Handle::NULL, ElementKind::Int)
        .unwrap()
        .is_none());
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("core.json");
    std::fs::write(
        &path,
        r#"{
            "symbols": { "v": { "ptr": "0x10" } },
            "records": {
                "0x10": { "shape": "Var", "fields": {
                    "type": { "enum": "T_Var" },
                    "varno": 65001, "varattno": 2, "varlevelsup": 0
                }}
            }
        }"#,
    )
    .unwrap();

    let mem = SnapshotMemory::load(&path).unwrap();
    let cmd = command(&mem, InspectConfig::default());
    assert_eq!(
        cmd.invoke("v").unwrap(),
        Report::Rendered("Var (varno=OUTER varattno=2 levelsup=0)".to_string())
    );
}
