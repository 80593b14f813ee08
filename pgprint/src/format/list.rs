// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Linked-list container walkers
//!
//! A list record holds `head`; each `ListCell` holds the element in
//! `ptr_value`, `int_value` or `oid_value` and a `next` link.

use super::dispatch::DispatchTable;
use super::tags::NodeTag;
use super::{Formatter, NIL_SENTINEL};
use crate::error::InspectResult;
use crate::memory::{Handle, MemoryAccessor, View};

/// Which member of the cell union a list stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Int,
    Oid,
}

impl ElementKind {
    fn cell_field(&self) -> &'static str {
        match self {
            ElementKind::Node => "ptr_value",
            ElementKind::Int => "int_value",
            ElementKind::Oid => "oid_value",
        }
    }
}

/// One list element read from its cell
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(Handle),
    Int(i64),
    Oid(i64),
}

/// Restartable view over a non-null list; each [`ListWalker::iter`] call
/// walks the links again from the head.
#[derive(Clone)]
pub struct ListWalker<'a> {
    mem: &'a dyn MemoryAccessor,
    head: Handle,
    kind: ElementKind,
}

impl<'a> ListWalker<'a> {
    /// `None` for a NULL list pointer
    pub fn new(mem: &'a dyn MemoryAccessor, list: Handle, kind: ElementKind) -> InspectResult<Option<Self>> {
        if mem.is_null(list) {
            return Ok(None);
        }
        let head = View::new(mem, list, "List")?.pointer("head")?;
        Ok(Some(Self { mem, head, kind }))
    }

    pub fn iter(&self) -> ListIter<'a> {
        ListIter {
            mem: self.mem,
            next: self.head,
            kind: self.kind,
        }
    }
}

/// Lazy cell-by-cell walk in stored order
pub struct ListIter<'a> {
    mem: &'a dyn MemoryAccessor,
    next: Handle,
    kind: ElementKind,
}

impl ListIter<'_> {
    fn step(&mut self) -> InspectResult<Element> {
        let cell = View::new(self.mem, self.next, "ListCell")?;
        let field = self.kind.cell_field();
        let element = match self.kind {
            ElementKind::Node => Element::Node(cell.pointer(field)?),
            ElementKind::Int => Element::Int(cell.int(field)?),
            ElementKind::Oid => Element::Oid(cell.int(field)?),
        };
        self.next = cell.pointer("next")?;
        Ok(element)
    }
}

impl Iterator for ListIter<'_> {
    type Item = InspectResult<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mem.is_null(self.next) {
            return None;
        }
        log::trace!("list cell {}", self.next);
        match self.step() {
            Ok(element) => Some(Ok(element)),
            Err(e) => {
                // a broken link ends the walk
                self.next = Handle::NULL;
                Some(Err(e))
            }
        }
    }
}

/// Render a list of nodes
///
/// `newline` puts one rendered element per line; otherwise the elements form a
/// bracketed, quoted literal list. A NULL list is `(NIL)` in both modes,
/// indented like a non-empty one.
pub fn format_node_list(f: &Formatter<'_>, list: Handle, depth: usize, newline: bool) -> InspectResult<String> {
    let walker = match ListWalker::new(f.memory(), list, ElementKind::Node)? {
        Some(walker) => walker,
        None => return Ok(f.indent(NIL_SENTINEL, depth)),
    };

    let mut items = Vec::new();
    for element in walker.iter() {
        items.push(match element? {
            Element::Node(h) => f.node(h)?,
            Element::Int(v) | Element::Oid(v) => v.to_string(),
        });
    }

    let text = if newline {
        items.join("\n")
    } else {
        let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
        format!("[{}]", quoted.join(", "))
    };
    Ok(f.indent(&text, depth))
}

/// Render a list of raw integers or OIDs as `[1, 2, 3]`
pub fn format_scalar_list(
    f: &Formatter<'_>,
    list: Handle,
    kind: ElementKind,
    depth: usize,
) -> InspectResult<String> {
    let walker = match ListWalker::new(f.memory(), list, kind)? {
        Some(walker) => walker,
        None => return Ok(f.indent(NIL_SENTINEL, depth)),
    };

    let mut values = Vec::new();
    for element in walker.iter() {
        values.push(match element? {
            Element::Int(v) | Element::Oid(v) => v.to_string(),
            Element::Node(h) => h.to_string(),
        });
    }
    Ok(f.indent(&format!("[{}]", values.join(", ")), depth))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn render_list(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    format_node_list(f, handle, 0, true)
}

fn render_int_list(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    Ok(format!("IntList: {}", f.int_list(handle, 0)?))
}

fn render_oid_list(f: &Formatter<'_>, handle: Handle, _tag: &NodeTag) -> InspectResult<String> {
    Ok(format!("OidList: {}", f.oid_list(handle, 0)?))
}

pub(super) fn register(table: &mut DispatchTable) {
    table.register(NodeTag::List, render_list);
    table.register(NodeTag::IntList, render_int_list);
    table.register(NodeTag::OidList, render_oid_list);
}
