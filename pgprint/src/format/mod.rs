// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tagged-node formatting engine
//!
//! A [`Formatter`] walks a tree of node records by recursive descent. Every
//! record is looked up in the [`DispatchTable`] by its tag and rendered at
//! depth 0; callers wrap the result in whatever indentation they need, so
//! nested levels compose bottom-up.

pub mod ddl;
pub mod dispatch;
pub mod expr;
pub mod indent;
pub mod list;
pub mod plan;
pub mod query;
pub mod tags;

use crate::config::InspectConfig;
use crate::error::{InspectError, InspectResult};
use crate::memory::{Handle, MemoryAccessor, View, TAG_FIELD};
use std::cell::Cell;

pub use dispatch::{DispatchTable, Renderer};
pub use indent::{indent, indent_with};
pub use list::{Element, ElementKind, ListWalker};
pub use tags::NodeTag;

/// Placeholder for an absent scalar child
pub const NULL_SENTINEL: &str = "(NULL)";

/// Placeholder for an absent list
pub const NIL_SENTINEL: &str = "(NIL)";

/// Substituted for nodes beyond the configured recursion limit
pub const DEPTH_MARKER: &str = "(... depth limit reached)";

/// Per-invocation rendering context
pub struct Formatter<'a> {
    mem: &'a dyn MemoryAccessor,
    table: &'a DispatchTable,
    config: &'a InspectConfig,
    depth: Cell<usize>,
}

impl<'a> Formatter<'a> {
    pub fn new(
        mem: &'a dyn MemoryAccessor,
        table: &'a DispatchTable,
        config: &'a InspectConfig,
    ) -> Self {
        Self {
            mem,
            table,
            config,
            depth: Cell::new(0),
        }
    }

    pub fn memory(&self) -> &'a dyn MemoryAccessor {
        self.mem
    }

    pub fn config(&self) -> &'a InspectConfig {
        self.config
    }

    /// Reinterpret `handle` as `shape` for field reads
    pub fn view(&self, handle: Handle, shape: &str) -> InspectResult<View<'a>> {
        View::new(self.mem, handle, shape)
    }

    pub fn indent(&self, text: &str, depth: usize) -> String {
        indent_with(text, depth, &self.config.indent_unit)
    }

    /// Tag of a node record; a record without a discriminator is a contract violation here
    pub fn tag(&self, handle: Handle) -> InspectResult<NodeTag> {
        match self.mem.tag_of(handle)? {
            Some(symbol) => Ok(NodeTag::parse(&symbol)),
            None => Err(InspectError::FieldNotFound {
                shape: "Node".to_string(),
                field: TAG_FIELD.to_string(),
            }),
        }
    }

    /// Whether `handle` is non-null and carries exactly `tag`
    pub fn is_a(&self, handle: Handle, tag: &NodeTag) -> InspectResult<bool> {
        if self.mem.is_null(handle) {
            return Ok(false);
        }
        Ok(self
            .mem
            .tag_of(handle)?
            .map(|symbol| NodeTag::parse(&symbol) == *tag)
            .unwrap_or(false))
    }

    /// Whether `handle` is non-null and its tag belongs to the named group
    pub fn is_kind_of(&self, handle: Handle, group: &str) -> InspectResult<bool> {
        if self.mem.is_null(handle) {
            return Ok(false);
        }
        Ok(match self.mem.tag_of(handle)? {
            Some(symbol) => self.table.is_kind_of(&NodeTag::parse(&symbol), group),
            None => false,
        })
    }

    /// Group membership for a tag already read
    pub fn in_group(&self, tag: &NodeTag, group: &str) -> bool {
        self.table.is_kind_of(tag, group)
    }

    /// Render any node in scalar context
    pub fn node(&self, handle: Handle) -> InspectResult<String> {
        if self.mem.is_null(handle) {
            return Ok(NULL_SENTINEL.to_string());
        }
        self.descend(0, || {
            let tag = self.tag(handle)?;
            self.table.render(self, handle, &tag)
        })
    }

    /// Render a node and indent the whole block
    pub fn node_at(&self, handle: Handle, depth: usize) -> InspectResult<String> {
        Ok(self.indent(&self.node(handle)?, depth))
    }

    /// Render a list of nodes; see [`list::format_node_list`]
    pub fn node_list(&self, list: Handle, depth: usize, newline: bool) -> InspectResult<String> {
        list::format_node_list(self, list, depth, newline)
    }

    /// Node list one element per line, the whole block (sentinel included) indented
    pub fn list_at(&self, list: Handle, depth: usize) -> InspectResult<String> {
        Ok(self.indent(&self.node_list(list, 0, true)?, depth))
    }

    pub fn int_list(&self, list: Handle, depth: usize) -> InspectResult<String> {
        list::format_scalar_list(self, list, ElementKind::Int, depth)
    }

    pub fn oid_list(&self, list: Handle, depth: usize) -> InspectResult<String> {
        list::format_scalar_list(self, list, ElementKind::Oid, depth)
    }

    /// Render a plan subtree; see [`plan::format_plan_tree`]
    ///
    /// A NULL child needs no recursion and is never truncated.
    pub fn plan_tree(&self, handle: Handle, depth: usize) -> InspectResult<String> {
        if self.mem.is_null(handle) {
            return Ok(self.indent(plan::NULL_PLAN, depth + 1));
        }
        self.descend(depth + 1, || plan::format_plan_tree(self, handle, depth))
    }

    /// Run one level of recursion, honoring the configured depth limit
    ///
    /// A truncated level renders as [`DEPTH_MARKER`] indented `marker_depth`
    /// levels, where the skipped block would have started.
    fn descend<F>(&self, marker_depth: usize, render: F) -> InspectResult<String>
    where
        F: FnOnce() -> InspectResult<String>,
    {
        let depth = self.depth.get();
        if let Some(limit) = self.config.max_depth {
            if depth >= limit {
                log::warn!("Node depth limit {} reached, truncating output", limit);
                return Ok(self.indent(DEPTH_MARKER, marker_depth));
            }
        }
        self.depth.set(depth + 1);
        let result = render();
        self.depth.set(depth);
        result
    }

    /// `\n<indent>[label] <rendered node>` when the pointer field is set, else empty
    pub fn child_block(&self, view: &View<'_>, field: &str, label: &str) -> InspectResult<String> {
        let child = view.pointer(field)?;
        if self.mem.is_null(child) {
            return Ok(String::new());
        }
        let body = format!("[{}] {}", label, self.node(child)?);
        Ok(format!("\n{}", self.indent(&body, 1)))
    }

    /// Like [`Formatter::child_block`] for a list-valued field
    pub fn list_block(&self, view: &View<'_>, field: &str, label: &str) -> InspectResult<String> {
        let list = view.pointer(field)?;
        if self.mem.is_null(list) {
            return Ok(String::new());
        }
        let body = format!("[{}] {}", label, self.node_list(list, 0, true)?);
        Ok(format!("\n{}", self.indent(&body, 1)))
    }

    /// `\n<indent>label:\n<body>` section used by plan and query headers
    pub fn section(&self, label: &str, body: &str) -> String {
        format!("\n{}:\n{}", self.indent(label, 1), body)
    }
}

/// Render a bare tag name; the catch-all for tags without a renderer
pub fn format_fallback(_f: &Formatter<'_>, _handle: Handle, tag: &NodeTag) -> InspectResult<String> {
    Ok(tag.name().to_string())
}
