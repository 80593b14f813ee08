/// Benchmark for plan tree rendering throughput
///
/// Builds a left-deep join tree over a snapshot and renders it repeatedly
/// through the shared dispatch table.

use pgprint::{DispatchTable, Formatter, Handle, InspectConfig, SnapshotMemory, Value};
use std::time::Instant;

const JOIN_DEPTH: u64 = 64;

fn plan_fields(tag: &str, id: u64, left: Handle, right: Handle) -> Vec<(&'static str, Value)> {
    vec![
        ("type", Value::Enum(format!("T_{}", tag))),
        ("startup_cost", Value::Float(0.0)),
        ("total_cost", Value::Float(id as f64 * 12.5)),
        ("plan_rows", Value::Float(1000.0)),
        ("plan_width", Value::Int(8)),
        ("plan_node_id", Value::Int(id as i64)),
        ("targetlist", Value::Handle(Handle::NULL)),
        ("initPlan", Value::Handle(Handle::NULL)),
        ("qual", Value::Handle(Handle::NULL)),
        ("joinqual", Value::Handle(Handle::NULL)),
        ("lefttree", Value::Handle(left)),
        ("righttree", Value::Handle(right)),
    ]
}

fn build_tree(memory: &mut SnapshotMemory) -> Handle {
    let mut address = 0x1000;
    let mut next = || {
        address += 0x100;
        Handle::new(address)
    };

    let first = next();
    memory.insert(first, "SeqScan", plan_fields("SeqScan", 0, Handle::NULL, Handle::NULL));

    let mut root = first;
    for id in 1..=JOIN_DEPTH {
        let scan = next();
        memory.insert(scan, "SeqScan", plan_fields("SeqScan", id * 2, Handle::NULL, Handle::NULL));
        let join = next();
        memory.insert(join, "HashJoin", plan_fields("HashJoin", id * 2 + 1, root, scan));
        root = join;
    }
    root
}

fn main() {
    println!("=== Render Throughput Benchmark ===\n");

    let mut memory = SnapshotMemory::new();
    let root = build_tree(&mut memory);
    let config = InspectConfig::default();
    let table = DispatchTable::global();

    println!("📊 Left-deep join tree ({} joins):", JOIN_DEPTH);
    let iterations = 500;
    let start = Instant::now();
    let mut bytes = 0;

    for _ in 0..iterations {
        let formatter = Formatter::new(&memory, table, &config);
        let output = formatter.node(root).expect("Failed to render plan tree");
        bytes += output.len();
    }

    let duration = start.elapsed();
    println!("  Iterations: {}", iterations);
    println!("  Time: {:?}", duration);
    println!(
        "  Throughput: {:.0} trees/sec",
        iterations as f64 / duration.as_secs_f64()
    );
    println!("  Output: {} bytes per tree", bytes / iterations);
}
