// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Expression node renderers

use super::dispatch::DispatchTable;
use super::tags::NodeTag;
use super::Formatter;
use crate::error::InspectResult;
use crate::memory::Handle;

/// Reserved `varno` of a Var referencing the inner plan's output
pub const INNER_VAR: i64 = 65000;

/// Reserved `varno` of a Var referencing the outer plan's output
pub const OUTER_VAR: i64 = 65001;

/// Type OIDs whose datums are printed in decimal: int8, int2, int4, oid
pub const DECIMAL_TYPES: &[i64] = &[20, 21, 23, 26];

fn format_target_entry(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let te = f.view(handle, "TargetEntry")?;

    let name = match te.text("resname")? {
        Some(name) => format!("\"{}\"", name),
        None => super::NULL_SENTINEL.to_string(),
    };

    Ok(format!(
        "TargetEntry (resno={} resname={} origtbl={} origcol={} junk={} expr=[{}])",
        te.show("resno")?,
        name,
        te.show("resorigtbl")?,
        te.show("resorigcol")?,
        te.flag("resjunk")?,
        f.node(te.pointer("expr")?)?
    ))
}

fn format_var(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let var = f.view(handle, "Var")?;

    let varno = match var.int("varno")? {
        INNER_VAR => "INNER".to_string(),
        OUTER_VAR => "OUTER".to_string(),
        n => n.to_string(),
    };

    Ok(format!(
        "Var (varno={} varattno={} levelsup={})",
        varno,
        var.show("varattno")?,
        var.show("varlevelsup")?
    ))
}

/// Datum display: decimal for integer-like types, hex of the raw word otherwise
pub fn format_datum(consttype: i64, value: i64) -> String {
    if DECIMAL_TYPES.contains(&consttype) {
        value.to_string()
    } else {
        format!("{:#x}", value as u64)
    }
}

fn format_const(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let c = f.view(handle, "Const")?;
    let consttype = c.int("consttype")?;

    Ok(format!(
        "Const (consttype={} consttypmod={} constlen={} constvalue={} constisnull={} constbyval={})",
        consttype,
        c.show("consttypmod")?,
        c.show("constlen")?,
        format_datum(consttype, c.int("constvalue")?),
        c.flag("constisnull")?,
        c.flag("constbyval")?
    ))
}

fn format_aggref(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let agg = f.view(handle, "Aggref")?;

    let mut out = format!(
        "Aggref (aggfnoid={} aggtype={} aggstage={})",
        agg.show("aggfnoid")?,
        agg.show("aggtype")?,
        agg.show("aggstage")?
    );
    out.push_str(&f.section("Aggref Args", &f.list_at(agg.pointer("args")?, 2)?));
    Ok(out)
}

fn format_case_expr(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let case = f.view(handle, "CaseExpr")?;

    let mut out = format!(
        "CaseExpr (casetype={} defresult={} arg={})",
        case.show("casetype")?,
        f.node(case.pointer("defresult")?)?,
        f.node(case.pointer("arg")?)?
    );
    out.push_str(&f.section("CaseExpr Args", &f.list_at(case.pointer("args")?, 2)?));
    Ok(out)
}

fn format_case_when(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let when = f.view(handle, "CaseWhen")?;
    Ok(format!(
        "CaseWhen (expr={} result={})",
        f.node(when.pointer("expr")?)?,
        f.node(when.pointer("result")?)?
    ))
}

fn format_coalesce_expr(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let coalesce = f.view(handle, "CoalesceExpr")?;

    let mut out = format!(
        "CoalesceExpr [coalescetype={} location={}]",
        coalesce.show("coalescetype")?,
        coalesce.show("location")?
    );
    out.push_str(&f.list_block(&coalesce, "args", "args")?);
    Ok(out)
}

/// Shared by OpExpr and DistinctExpr, which have the same layout
fn format_op_expr(f: &Formatter<'_>, handle: Handle, tag: &NodeTag) -> InspectResult<String> {
    let op = f.view(handle, "OpExpr")?;
    Ok(format!(
        "{} [opno={} opfuncid={} opresulttype={}]\n{}",
        tag,
        op.show("opno")?,
        op.show("opfuncid")?,
        op.show("opresulttype")?,
        f.list_at(op.pointer("args")?, 1)?
    ))
}

fn format_func_expr(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let func = f.view(handle, "FuncExpr")?;
    Ok(format!(
        "FuncExpr [funcid={} funcresulttype={} funcretset={} funcformat={} location={} is_tablefunc={}]\n{}",
        func.show("funcid")?,
        func.show("funcresulttype")?,
        func.flag("funcretset")?,
        func.show("funcformat")?,
        func.show("location")?,
        func.flag("is_tablefunc")?,
        f.list_at(func.pointer("args")?, 1)?
    ))
}

fn format_scalar_array_op_expr(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let op = f.view(handle, "ScalarArrayOpExpr")?;
    Ok(format!(
        "ScalarArrayOpExpr [opno={} opfuncid={} useOr={}]\n{}",
        op.show("opno")?,
        op.show("opfuncid")?,
        op.flag("useOr")?,
        f.list_at(op.pointer("args")?, 1)?
    ))
}

fn format_bool_expr(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let expr = f.view(handle, "BoolExpr")?;
    Ok(format!(
        "BoolExpr [op={}]\n{}",
        expr.show("boolop")?,
        f.list_at(expr.pointer("args")?, 1)?
    ))
}

fn format_sub_plan(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let sub = f.view(handle, "SubPlan")?;
    Ok(format!(
        "SubPlan (subLinkType={} plan_id={} plan_name={})\n{}",
        sub.show("subLinkType")?,
        sub.show("plan_id")?,
        sub.show("plan_name")?,
        f.list_at(sub.pointer("args")?, 1)?
    ))
}

fn format_param(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    let param = f.view(handle, "Param")?;
    Ok(format!(
        "Param (paramkind={} paramid={} paramtype={} paramtypmod={} location={})",
        param.show("paramkind")?,
        param.show("paramid")?,
        param.show("paramtype")?,
        param.show("paramtypmod")?,
        param.show("location")?
    ))
}

fn eval_func(f: &Formatter<'_>, state: Handle) -> InspectResult<String> {
    if f.memory().is_null(state) {
        return Ok(super::NULL_SENTINEL.to_string());
    }
    f.view(state, "ExprState")?.show("evalfunc")
}

fn format_generic_expr_state(
    f: &Formatter<'_>,
    handle: Handle,
    _tag: &NodeTag,
) -> InspectResult<String> {
    let state = f.view(handle, "GenericExprState")?;
    let xprstate = state.pointer("xprstate")?;
    let expr = if f.memory().is_null(xprstate) {
        Handle::NULL
    } else {
        f.view(xprstate, "ExprState")?.pointer("expr")?
    };

    Ok(format!(
        "GenericExprState [evalFunc={} childEvalFunc={}]\n{}",
        eval_func(f, xprstate)?,
        eval_func(f, state.pointer("arg")?)?,
        f.node_at(expr, 1)?
    ))
}

fn format_string(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    Ok(format!("String: {}", f.view(handle, "Value")?.show("str")?))
}

fn format_integer(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    Ok(format!("Integer: {}", f.view(handle, "Value")?.show("ival")?))
}

pub(super) fn register(table: &mut DispatchTable) {
    table.register(NodeTag::TargetEntry, format_target_entry);
    table.register(NodeTag::Var, format_var);
    table.register(NodeTag::Const, format_const);
    table.register(NodeTag::Aggref, format_aggref);
    table.register(NodeTag::CaseExpr, format_case_expr);
    table.register(NodeTag::CaseWhen, format_case_when);
    table.register(NodeTag::CoalesceExpr, format_coalesce_expr);
    table.register(NodeTag::OpExpr, format_op_expr);
    table.register(NodeTag::DistinctExpr, format_op_expr);
    table.register(NodeTag::FuncExpr, format_func_expr);
    table.register(NodeTag::ScalarArrayOpExpr, format_scalar_array_op_expr);
    table.register(NodeTag::BoolExpr, format_bool_expr);
    table.register(NodeTag::SubPlan, format_sub_plan);
    table.register(NodeTag::Param, format_param);
    table.register(NodeTag::GenericExprState, format_generic_expr_state);
    table.register(NodeTag::String, format_string);
    table.register(NodeTag::Integer, format_integer);
}
