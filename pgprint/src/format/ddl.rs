// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! DDL and partitioning descriptor renderers
//!
//! Each descriptor is a one-line header of scalar fields followed by one
//! `[field] ...` block per optional child, skipped when the child is NULL.

use super::dispatch::DispatchTable;
use super::tags::NodeTag;
use super::{Formatter, NIL_SENTINEL};
use crate::error::InspectResult;
use crate::memory::{Handle, View};

fn format_type_cast(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let cast = f.view(handle, "TypeCast")?;

    let mut out = format!("TypeCast (location={})", cast.show("location")?);
    out.push_str(&f.child_block(&cast, "typeName", "typeName")?);
    out.push_str(&f.child_block(&cast, "arg", "arg")?);
    Ok(out)
}

fn format_def_elem(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let elem = f.view(handle, "DefElem")?;

    let mut out = format!(
        "DefElem (defname={} defaction={})",
        elem.show("defname")?,
        elem.show("defaction")?
    );
    out.push_str(&f.child_block(&elem, "arg", "arg")?);
    Ok(out)
}

fn format_alter_table_cmd(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let cmd = f.view(handle, "AlterTableCmd")?;

    let name = match cmd.text("name")? {
        Some(name) => format!("\"{}\"", name),
        None => NIL_SENTINEL.to_string(),
    };

    let mut out = format!(
        "AlterTableCmd (subtype={} name={} behavior={} part_expanded={})",
        cmd.show("subtype")?,
        name,
        cmd.show("behavior")?,
        cmd.flag("part_expanded")?
    );
    out.push_str(&f.child_block(&cmd, "def", "definition")?);
    Ok(out)
}

fn format_alter_partition_cmd(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let cmd = f.view(handle, "AlterPartitionCmd")?;

    let mut out = format!("AlterPartitionCmd (location={})", cmd.show("location")?);
    for field in ["partid", "arg1", "arg2"] {
        out.push_str(&f.child_block(&cmd, field, field)?);
    }
    Ok(out)
}

fn format_alter_partition_id(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let id = f.view(handle, "AlterPartitionId")?;

    // partiddef is either a List of values or a single String; dispatch covers both
    let mut out = format!(
        "AlterPartitionId (idtype={} location={})",
        id.show("idtype")?,
        id.show("location")?
    );
    out.push_str(&f.child_block(&id, "partiddef", "partiddef")?);
    Ok(out)
}

fn format_pg_part_rule(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let rule = f.view(handle, "PgPartRule")?;

    let mut out = format!(
        "PgPartRule (partIdStr={} isName={} topRuleRank={} relname={})",
        rule.show("partIdStr")?,
        rule.flag("isName")?,
        rule.show("topRuleRank")?,
        rule.show("relname")?
    );
    out.push_str(&f.child_block(&rule, "pNode", "pNode")?);
    out.push_str(&f.child_block(&rule, "topRule", "topRule")?);
    Ok(out)
}

fn format_partition_node(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let node = f.view(handle, "PartitionNode")?;

    let mut out = String::from("PartitionNode");
    out.push_str(&f.child_block(&node, "part", "part")?);
    out.push_str(&f.child_block(&node, "default_part", "default_part")?);
    out.push_str(&f.list_block(&node, "rules", "rules")?);
    Ok(out)
}

fn format_partition_elem(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let elem = f.view(handle, "PartitionElem")?;

    let mut out = format!(
        "PartitionElem (partName={} isDefault={} AddPartDesc={} partno={} rrand={} location={})",
        elem.show("partName")?,
        elem.flag("isDefault")?,
        elem.show("AddPartDesc")?,
        elem.show("partno")?,
        elem.show("rrand")?,
        elem.show("location")?
    );
    for field in ["boundSpec", "subSpec", "storeAttr"] {
        out.push_str(&f.child_block(&elem, field, field)?);
    }
    out.push_str(&f.list_block(&elem, "colencs", "colencs")?);
    Ok(out)
}

fn format_partition_bound_spec(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let spec = f.view(handle, "PartitionBoundSpec")?;

    let mut out = format!(
        "PartitionBoundSpec (pWithTnameStr={} location={})",
        spec.show("pWithTnameStr")?,
        spec.show("location")?
    );
    for field in ["partStart", "partEnd", "partEvery"] {
        out.push_str(&f.child_block(&spec, field, field)?);
    }
    out.push_str(&f.list_block(&spec, "everyGenList", "everyGenList")?);
    Ok(out)
}

fn format_partition_range_item(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let item = f.view(handle, "PartitionRangeItem")?;

    let mut out = format!(
        "PartitionRangeItem (partedge={} everycount={} location={})",
        item.show("partedge")?,
        item.show("everycount")?,
        item.show("location")?
    );
    out.push_str(&f.list_block(&item, "partRangeVal", "partRangeVal")?);
    Ok(out)
}

fn format_partition(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let part = f.view(handle, "Partition")?;
    Ok(format!(
        "Partition (partid={} parrelid={} parkind={} parlevel={} paristemplate={} parnatts={} paratts={} parclass={})",
        part.show("partid")?,
        part.show("parrelid")?,
        part.show("parkind")?,
        part.show("parlevel")?,
        part.flag("paristemplate")?,
        part.show("parnatts")?,
        part.show("paratts")?,
        part.show("parclass")?
    ))
}

/// `[label] ...` block for a bound list that carries an inclusivity flag
fn bound_block(
    f: &Formatter<'_>,
    rule: &View<'_>,
    field: &str,
    inclusive: &str,
) -> InspectResult<String> {
    if !rule.is_set(field)? {
        return Ok(String::new());
    }
    let label = format!("{} {}={}", field, inclusive, rule.flag(inclusive)?);
    f.list_block(rule, field, &label)
}

/// Bracketed single-line form for value lists
fn inline_list_block(f: &Formatter<'_>, rule: &View<'_>, field: &str) -> InspectResult<String> {
    let list = rule.pointer(field)?;
    if f.memory().is_null(list) {
        return Ok(String::new());
    }
    let body = format!("[{}] {}", field, f.node_list(list, 0, false)?);
    Ok(format!("\n{}", f.indent(&body, 1)))
}

fn format_partition_rule(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let rule = f.view(handle, "PartitionRule")?;

    let mut out = format!(
        "PartitionRule (parruleid={} paroid={} parchildrelid={} parparentoid={} parisdefault={} parname={} parruleord={} partemplatespaceId={})",
        rule.show("parruleid")?,
        rule.show("paroid")?,
        rule.show("parchildrelid")?,
        rule.show("parparentoid")?,
        rule.flag("parisdefault")?,
        rule.show("parname")?,
        rule.show("parruleord")?,
        rule.show("partemplatespaceId")?
    );
    out.push_str(&bound_block(f, &rule, "parrangestart", "parrangestartincl")?);
    out.push_str(&bound_block(f, &rule, "parrangeend", "parrangeendincl")?);
    out.push_str(&f.list_block(&rule, "parrangeevery", "parrangeevery")?);
    out.push_str(&inline_list_block(f, &rule, "parlistvalues")?);
    out.push_str(&inline_list_block(f, &rule, "parreloptions")?);
    out.push_str(&f.child_block(&rule, "children", "children")?);
    Ok(out)
}

pub(super) fn register(table: &mut DispatchTable) {
    table.register(NodeTag::TypeCast, format_type_cast);
    table.register(NodeTag::DefElem, format_def_elem);
    table.register(NodeTag::AlterTableCmd, format_alter_table_cmd);
    table.register(NodeTag::AlterPartitionCmd, format_alter_partition_cmd);
    table.register(NodeTag::AlterPartitionId, format_alter_partition_id);
    table.register(NodeTag::PgPartRule, format_pg_part_rule);
    table.register(NodeTag::PartitionNode, format_partition_node);
    table.register(NodeTag::PartitionElem, format_partition_elem);
    table.register(NodeTag::PartitionBoundSpec, format_partition_bound_spec);
    table.register(NodeTag::PartitionRangeItem, format_partition_range_item);
    table.register(NodeTag::Partition, format_partition);
    table.register(NodeTag::PartitionRule, format_partition_rule);
}
