// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan tree rendering
//!
//! Every plan-like node renders as an EXPLAIN-style header followed by its
//! target list, optional initPlan and qual lists, kind-specific extras, and
//! finally its children. The whole block is indented one level deeper than
//! requested, so child plans telescope to the right.

use super::tags::{NodeTag, JOIN_GROUP};
use super::Formatter;
use crate::error::InspectResult;
use crate::memory::{Handle, View};

/// Placeholder for an absent child plan
pub const NULL_PLAN: &str = "-> (NULL)";

/// Group renderer for plan-like tags
pub fn render_plan(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    format_plan_tree(f, handle, 0)
}

/// Render a plan subtree indented `depth + 1` levels
pub fn format_plan_tree(f: &Formatter<'_>, handle: Handle, depth: usize) -> InspectResult<String> {
    if f.memory().is_null(handle) {
        return Ok(f.indent(NULL_PLAN, depth + 1));
    }

    let tag = f.tag(handle)?;
    let plan = f.view(handle, "Plan")?;

    let mut out = header(&plan, &tag)?;
    out.push_str(&f.section("target list", &f.list_at(plan.pointer("targetlist")?, 2)?));

    if plan.is_set("initPlan")? {
        out.push_str(&f.section("initPlan", &f.list_at(plan.pointer("initPlan")?, 2)?));
    }
    if plan.is_set("qual")? {
        out.push_str(&f.section("qual", &f.list_at(plan.pointer("qual")?, 2)?));
    }

    out.push_str(&kind_details(f, handle, &tag)?);
    out.push_str(&children(f, &plan, &tag)?);

    Ok(f.indent(&out, depth + 1))
}

fn header(plan: &View<'_>, tag: &NodeTag) -> InspectResult<String> {
    Ok(format!(
        "-> {} (cost={:.3}...{:.3} rows={} width={}) id={}",
        tag,
        plan.float("startup_cost")?,
        plan.float("total_cost")?,
        plan.show("plan_rows")?,
        plan.show("plan_width")?,
        plan.show("plan_node_id")?
    ))
}

/// Extras that depend on the concrete plan kind
fn kind_details(f: &Formatter<'_>, handle: Handle, tag: &NodeTag) -> InspectResult<String> {
    let mut out = String::new();

    if *tag == NodeTag::Result {
        let result = f.view(handle, "Result")?;
        // either a single expression or a List of them; dispatch handles both
        let qual = result.pointer("resconstantqual")?;
        if !f.memory().is_null(qual) {
            out.push_str(&f.section("resconstantqual", &f.node_at(qual, 2)?));
        }
    }

    if f.in_group(tag, JOIN_GROUP) {
        let join = f.view(handle, "Join")?;
        if join.is_set("joinqual")? {
            out.push_str(&f.section("joinqual", &f.list_at(join.pointer("joinqual")?, 2)?));
        }
    }

    Ok(out)
}

fn children(f: &Formatter<'_>, plan: &View<'_>, tag: &NodeTag) -> InspectResult<String> {
    match tag {
        NodeTag::Append => {
            let append = f.view(plan.handle(), "Append")?;
            let plans = append.pointer("appendplans")?;
            // each child plan indents itself one level, plus one for the list
            Ok(format!("\n{}", f.node_list(plans, 1, true)?))
        }
        NodeTag::SubqueryScan => {
            let subquery = f.view(plan.handle(), "SubqueryScan")?;
            Ok(format!("\n{}", f.plan_tree(subquery.pointer("subplan")?, 0)?))
        }
        _ => Ok(format!(
            "\n{}\n{}",
            f.plan_tree(plan.pointer("lefttree")?, 0)?,
            f.plan_tree(plan.pointer("righttree")?, 0)?
        )),
    }
}
