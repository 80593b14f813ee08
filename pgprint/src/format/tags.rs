// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Node tag set
//!
//! Tags arrive from memory as enumerator symbols (`T_SeqScan`). Known tags
//! map to dedicated variants; anything else is carried as [`NodeTag::Other`]
//! and still renders through the fallback.

use std::fmt;

macro_rules! node_tags {
    ($($name:ident),* $(,)?) => {
        /// Discriminator of a node record, without the `T_` prefix
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeTag {
            $($name,)*
            Other(String),
        }

        impl NodeTag {
            /// Parse an enumerator symbol, with or without the `T_` prefix
            pub fn parse(symbol: &str) -> NodeTag {
                let bare = symbol.strip_prefix("T_").unwrap_or(symbol);
                match bare {
                    $(stringify!($name) => NodeTag::$name,)*
                    other => NodeTag::Other(other.to_string()),
                }
            }

            /// Bare tag name, e.g. `SeqScan`
            pub fn name(&self) -> &str {
                match self {
                    $(NodeTag::$name => stringify!($name),)*
                    NodeTag::Other(name) => name,
                }
            }
        }
    };
}

node_tags! {
    // plan nodes
    Plan, Result, Repeat, Append, Sequence, Motion, AOCSScan, BitmapAnd,
    BitmapOr, Scan, SeqScan, TableScan, IndexScan, DynamicIndexScan,
    BitmapIndexScan, BitmapHeapScan, BitmapAppendOnlyScan, BitmapTableScan,
    DynamicTableScan, TidScan, SubqueryScan, FunctionScan, TableFunctionScan,
    ValuesScan, ExternalScan, AppendOnlyScan, Join, NestLoop, MergeJoin,
    HashJoin, ShareInputScan, Material, Sort, Agg, Window, Unique, Hash, SetOp,
    Limit, DML, SplitUpdate, AssertOp, RowTrigger, PartitionSelector,

    // expressions
    TargetEntry, Var, Const, Aggref, CaseExpr, CaseWhen, CoalesceExpr, OpExpr,
    DistinctExpr, FuncExpr, ScalarArrayOpExpr, BoolExpr, SubPlan, Param,
    GenericExprState,

    // query and planner state
    RangeTblRef, RangeTblEntry, RelOptInfo, RestrictInfo, FromExpr, Query,
    PlannedStmt, PlannerInfo,

    // containers and value nodes
    List, IntList, OidList, String, Integer,

    // DDL and partitioning
    TypeCast, DefElem, AlterTableCmd, AlterPartitionCmd, AlterPartitionId,
    PgPartRule, PartitionNode, PartitionElem, PartitionBoundSpec,
    PartitionRangeItem, Partition, PartitionRule,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Group of tags rendered as execution plan steps
pub const PLAN_GROUP: &str = "Plan";

/// Plan kinds carrying a join qualifier list
pub const JOIN_GROUP: &str = "Join";

pub const PLAN_NODES: &[&str] = &[
    "Plan", "Result", "Repeat", "Append", "Sequence", "Motion", "AOCSScan",
    "BitmapAnd", "BitmapOr", "Scan", "SeqScan", "TableScan", "IndexScan",
    "DynamicIndexScan", "BitmapIndexScan", "BitmapHeapScan",
    "BitmapAppendOnlyScan", "BitmapTableScan", "DynamicTableScan", "TidScan",
    "SubqueryScan", "FunctionScan", "TableFunctionScan", "ValuesScan",
    "ExternalScan", "AppendOnlyScan", "Join", "NestLoop", "MergeJoin",
    "HashJoin", "ShareInputScan", "Material", "Sort", "Agg", "Window", "Unique",
    "Hash", "SetOp", "Limit", "DML", "SplitUpdate", "AssertOp", "RowTrigger",
    "PartitionSelector",
];

pub const JOIN_NODES: &[&str] = &["Join", "NestLoop", "MergeJoin", "HashJoin"];
