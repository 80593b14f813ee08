// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Report and symbol formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use pgprint::{MemoryAccessor, Report, SnapshotMemory, Value};

/// Terminal formatting for command outcomes
pub struct ReportFormatter;

impl ReportFormatter {
    /// Rendered trees print as-is; diagnostics are colored
    pub fn report(report: &Report) -> String {
        match report {
            Report::Rendered(text) => text.clone(),
            Report::Usage(text) => text.yellow().to_string(),
            Report::NotANode(text) => text.red().to_string(),
        }
    }

    /// Table of snapshot symbols with the tag each one points at
    pub fn symbols(memory: &SnapshotMemory) -> String {
        let mut symbols = memory.symbols().peekable();
        if symbols.peek().is_none() {
            return format!("{}", "No symbols defined".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Symbol").fg(Color::Green),
            Cell::new("Value").fg(Color::Green),
            Cell::new("Shape").fg(Color::Green),
            Cell::new("Tag").fg(Color::Green),
        ]);

        for (name, value) in symbols {
            let (shape, tag) = Self::describe(memory, value);
            table.add_row(vec![name.clone(), value.to_string(), shape, tag]);
        }

        table.to_string()
    }

    fn describe(memory: &SnapshotMemory, value: &Value) -> (String, String) {
        let handle = match value.as_handle() {
            Some(h) if !h.is_null() => h,
            Some(_) => return ("-".to_string(), "(NULL)".to_string()),
            None => return (value.kind_name().to_string(), "-".to_string()),
        };

        let shape = memory.shape_of(handle).unwrap_or("?").to_string();
        let tag = match memory.tag_of(handle) {
            Ok(Some(tag)) => tag,
            Ok(None) => "-".to_string(),
            Err(e) => format!("error: {}", e),
        };
        (shape, tag)
    }
}
