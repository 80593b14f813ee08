// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query, planned statement and planner state renderers

use super::dispatch::DispatchTable;
use super::tags::NodeTag;
use super::Formatter;
use crate::error::{InspectError, InspectResult};
use crate::memory::{Handle, Value};

fn format_range_tbl_ref(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let rtr = f.view(handle, "RangeTblRef")?;
    Ok(format!("RangeTblRef (rtindex={})", rtr.int("rtindex")?))
}

fn format_range_tbl_entry(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let rte = f.view(handle, "RangeTblEntry")?;
    Ok(format!(
        "RangeTblEntry (kind={} relid={})",
        rte.show("rtekind")?,
        rte.show("relid")?
    ))
}

/// Members of a relid bitmapset as `(b 1 3)`; NULL is the empty set
pub fn format_relids(f: &Formatter<'_>, relids: Handle) -> InspectResult<String> {
    if f.memory().is_null(relids) {
        return Ok("(b)".to_string());
    }

    let set = f.view(relids, "Bitmapset")?;
    let nwords = set.int("nwords")?.max(0) as usize;
    let bits = f.config().bitmapword_bits.clamp(1, 64) as usize;

    let mut out = String::from("(b");
    for (i, word) in set.array("words")?.iter().take(nwords).enumerate() {
        let word = match word {
            Value::Int(w) => *w as u64,
            other => {
                return Err(InspectError::FieldType {
                    field: "words".to_string(),
                    expected: "integer",
                    found: other.kind_name(),
                })
            }
        };
        for bit in 0..bits {
            if word >> bit & 1 == 1 {
                out.push_str(&format!(" {}", i * bits + bit));
            }
        }
    }
    out.push(')');
    Ok(out)
}

fn format_rel_opt_info(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let rel = f.view(handle, "RelOptInfo")?;
    Ok(format!(
        "RelOptInfo (kind={} relids={} rtekind={} relid={} rows={} width={} fk={})",
        rel.show("reloptkind")?,
        format_relids(f, rel.pointer("relids")?)?,
        rel.show("rtekind")?,
        rel.show("relid")?,
        rel.show("rows")?,
        rel.show("width")?,
        rel.flag("has_fk_join")?
    ))
}

fn format_restrict_info(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let info = f.view(handle, "RestrictInfo")?;
    Ok(format!(
        "RestrictInfo (pushed_down={} can_join={} delayed={})\n{}\n{}",
        info.flag("is_pushed_down")?,
        info.flag("can_join")?,
        info.flag("outerjoin_delayed")?,
        f.node_at(info.pointer("clause")?, 1)?,
        f.node_at(info.pointer("orclause")?, 1)?
    ))
}

fn format_from_expr(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let from = f.view(handle, "FromExpr")?;

    let mut out = format!("FromExpr\n{}", f.list_at(from.pointer("fromlist")?, 1)?);
    let quals = from.pointer("quals")?;
    if !f.memory().is_null(quals) {
        out.push_str(&f.section("quals", &f.node_at(quals, 2)?));
    }
    Ok(out)
}

fn format_query(f: &Formatter<'_>, handle: Handle, tag: &NodeTag) -> InspectResult<String> {
    let query = f.view(handle, "Query")?;
    Ok(format!(
        "          type: {}
  command type: {}
  query source: {}
   can set tag: {}
   range table:
{}
      jointree:
{}
    targetList:
{}
 returningList:
{}",
        tag,
        query.show("commandType")?,
        query.show("querySource")?,
        query.flag("canSetTag")?,
        f.list_at(query.pointer("rtable")?, 1)?,
        f.node_at(query.pointer("jointree")?, 1)?,
        f.node_at(query.pointer("targetList")?, 1)?,
        f.node_at(query.pointer("returningList")?, 1)?
    ))
}

fn format_planned_stmt(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let stmt = f.view(handle, "PlannedStmt")?;
    Ok(format!(
        "          type: {}
       planGen: {}
   can set tag: {}
     transient: {}
     plan tree:
{}
   range table:
{}
 relation OIDs: {}
   result rels: {}
  utility stmt: {}
      subplans:
{}",
        stmt.show("commandType")?,
        stmt.show("planGen")?,
        stmt.flag("canSetTag")?,
        stmt.flag("transientPlan")?,
        f.plan_tree(stmt.pointer("planTree")?, 0)?,
        f.list_at(stmt.pointer("rtable")?, 1)?,
        f.oid_list(stmt.pointer("relationOids")?, 0)?,
        f.int_list(stmt.pointer("resultRelations")?, 0)?,
        f.node(stmt.pointer("utilityStmt")?)?,
        f.list_at(stmt.pointer("subplans")?, 1)?
    ))
}

/// `i => node` lines for positions `start..end` of a pointer array
pub fn format_node_array(
    f: &Formatter<'_>,
    items: &[Value],
    start: usize,
    end: usize,
) -> InspectResult<String> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate().take(end).skip(start) {
        let node = item.as_handle().ok_or(InspectError::FieldType {
            field: format!("[{}]", i),
            expected: "handle",
            found: item.kind_name(),
        })?;
        lines.push(format!("{} => {}", i, f.node(node)?));
    }
    Ok(lines.join("\n"))
}

fn format_planner_info(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let info = f.view(handle, "PlannerInfo")?;
    // slot 0 is unused; valid range-table indexes run 1..size
    let size = info.int("simple_rel_array_size")?.max(0) as usize;

    let rels = format_node_array(f, &info.array("simple_rel_array")?, 1, size)?;
    let rtes = format_node_array(f, &info.array("simple_rte_array")?, 1, size)?;

    Ok(format!(
        "PlannerInfo (query_level={})\nrel:\n{}\nrte:\n{}",
        info.show("query_level")?,
        f.indent(&rels, 1),
        f.indent(&rtes, 1)
    ))
}

pub(super) fn register(table: &mut DispatchTable) {
    table.register(NodeTag::RangeTblRef, format_range_tbl_ref);
    table.register(NodeTag::RangeTblEntry, format_range_tbl_entry);
    table.register(NodeTag::RelOptInfo, format_rel_opt_info);
    table.register(NodeTag::RestrictInfo, format_restrict_info);
    table.register(NodeTag::FromExpr, format_from_expr);
    table.register(NodeTag::Query, format_query);
    table.register(NodeTag::PlannedStmt, format_planned_stmt);
    table.register(NodeTag::PlannerInfo, format_planner_info);
}
