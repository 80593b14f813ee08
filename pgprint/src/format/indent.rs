// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Line-prefix indentation

/// Default indentation unit
pub const INDENT_UNIT: &str = "\t";

/// Prefix every line of `text`, empty lines included, with `depth` tabs
pub fn indent(text: &str, depth: usize) -> String {
    indent_with(text, depth, INDENT_UNIT)
}

/// Prefix every line of `text` with `depth` copies of `unit`
///
/// `indent_with(&indent_with(s, a, u), b, u) == indent_with(s, a + b, u)`.
pub fn indent_with(text: &str, depth: usize, unit: &str) -> String {
    if depth == 0 {
        return text.to_string();
    }
    let prefix = unit.repeat(depth);
    text.split('\n')
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
