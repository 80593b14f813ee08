// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Report driver and the `pgprint` command

use crate::config::InspectConfig;
use crate::error::InspectResult;
use crate::format::{DispatchTable, Formatter, NULL_SENTINEL};
use crate::memory::{ExpressionEvaluator, MemoryAccessor, Value};
use std::fmt;

/// One-line usage message for a wrong argument count
pub const USAGE: &str = "usage: pgprint var";

/// Diagnostic for a value without a tag field
pub const NOT_A_NODE: &str = "not a node type";

/// Outcome of one print invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Full formatted node tree
    Rendered(String),
    /// Wrong argument count; nothing was evaluated
    Usage(String),
    /// The expression resolved to something that is not a node
    NotANode(String),
}

impl Report {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Report::Rendered(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Report::Rendered(s) | Report::Usage(s) | Report::NotANode(s) => s,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Render an already-resolved value
///
/// A NULL handle renders as the scalar sentinel. A non-handle value, or a
/// record whose shape has no tag field, yields [`Report::NotANode`].
pub fn render_report(
    mem: &dyn MemoryAccessor,
    table: &DispatchTable,
    config: &InspectConfig,
    value: &Value,
) -> InspectResult<Report> {
    let handle = match value.as_handle() {
        Some(handle) => handle,
        None => {
            log::debug!("value of kind {} is not a node", value.kind_name());
            return Ok(Report::NotANode(NOT_A_NODE.to_string()));
        }
    };

    if mem.is_null(handle) {
        return Ok(Report::Rendered(NULL_SENTINEL.to_string()));
    }
    if mem.tag_of(handle)?.is_none() {
        return Ok(Report::NotANode(NOT_A_NODE.to_string()));
    }

    let formatter = Formatter::new(mem, table, config);
    Ok(Report::Rendered(formatter.node(handle)?))
}

/// The `pgprint <expr>` command bound to one inspection environment
pub struct PrintCommand<'a> {
    mem: &'a dyn MemoryAccessor,
    evaluator: &'a dyn ExpressionEvaluator,
    table: &'a DispatchTable,
    config: InspectConfig,
}

impl<'a> PrintCommand<'a> {
    pub const NAME: &'static str = "pgprint";

    pub fn new(
        mem: &'a dyn MemoryAccessor,
        evaluator: &'a dyn ExpressionEvaluator,
        table: &'a DispatchTable,
        config: InspectConfig,
    ) -> Self {
        Self {
            mem,
            evaluator,
            table,
            config,
        }
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Run the command on its raw argument string
    ///
    /// Arguments are split with shell quoting rules. Anything other than
    /// exactly one word, including an unterminated quote, is a usage error.
    pub fn invoke(&self, args: &str) -> InspectResult<Report> {
        let argv = match shell_words::split(args) {
            Ok(argv) => argv,
            Err(e) => {
                log::debug!("cannot split {:?}: {}", args, e);
                return Ok(Report::Usage(USAGE.to_string()));
            }
        };
        if argv.len() != 1 {
            return Ok(Report::Usage(USAGE.to_string()));
        }

        log::debug!("pgprint {}", argv[0]);
        let value = self.evaluator.evaluate(&argv[0])?;
        render_report(self.mem, self.table, &self.config, &value)
    }
}
