// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tag-indexed renderer table
//!
//! Resolution for a tag: exact renderer first, then the renderer of the first
//! matching group in registration order, then the bare tag name.

use super::tags::{NodeTag, JOIN_GROUP, JOIN_NODES, PLAN_GROUP, PLAN_NODES};
use super::{ddl, expr, format_fallback, list, plan, query, Formatter};
use crate::error::InspectResult;
use crate::memory::Handle;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Renders one record whose tag has already been read
pub type Renderer = fn(&Formatter<'_>, Handle, &NodeTag) -> InspectResult<String>;

static STANDARD_TABLE: Lazy<DispatchTable> = Lazy::new(DispatchTable::standard);

/// Named set of tags sharing a family renderer
struct TagGroup {
    name: &'static str,
    members: HashSet<NodeTag>,
    renderer: Option<Renderer>,
}

/// Map from tag to renderer plus ordered supertype groups
pub struct DispatchTable {
    exact: HashMap<NodeTag, Renderer>,
    groups: Vec<TagGroup>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    /// Empty table; every tag renders through the fallback
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Shared table with all built-in renderers, built on first use
    pub fn global() -> &'static DispatchTable {
        &STANDARD_TABLE
    }

    /// Table with all built-in renderers registered
    pub fn standard() -> Self {
        let mut table = Self::new();

        table.register_group(PLAN_GROUP, PLAN_NODES, Some(plan::render_plan));
        table.register_group(JOIN_GROUP, JOIN_NODES, None);

        expr::register(&mut table);
        query::register(&mut table);
        ddl::register(&mut table);
        list::register(&mut table);

        log::debug!(
            "Built dispatch table: {} exact renderers, {} groups",
            table.exact.len(),
            table.groups.len()
        );
        table
    }

    pub fn register(&mut self, tag: NodeTag, renderer: Renderer) {
        self.exact.insert(tag, renderer);
    }

    /// Add a named group. Groups with a renderer are consulted in
    /// registration order when no exact renderer matches.
    pub fn register_group(
        &mut self,
        name: &'static str,
        members: &[&str],
        renderer: Option<Renderer>,
    ) {
        self.groups.push(TagGroup {
            name,
            members: members.iter().map(|m| NodeTag::parse(m)).collect(),
            renderer,
        });
    }

    pub fn has_renderer(&self, tag: &NodeTag) -> bool {
        self.exact.contains_key(tag)
    }

    pub fn is_kind_of(&self, tag: &NodeTag, group: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.name == group && g.members.contains(tag))
    }

    /// Pick the renderer for `tag`
    pub fn resolve(&self, tag: &NodeTag) -> Renderer {
        if let Some(renderer) = self.exact.get(tag) {
            return *renderer;
        }
        self.groups
            .iter()
            .filter(|g| g.members.contains(tag))
            .find_map(|g| g.renderer)
            .unwrap_or(format_fallback as Renderer)
    }

    pub fn render(&self, f: &Formatter<'_>, handle: Handle, tag: &NodeTag) -> InspectResult<String> {
        log::debug!("render {} at {}", tag, handle);
        (self.resolve(tag))(f, handle, tag)
    }
}
