// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rendering configuration

use crate::error::InspectResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options that shape the rendered report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Text prepended once per indentation level
    pub indent_unit: String,

    /// Recursion limit; deeper nodes render as a truncation marker.
    /// `None` walks the whole tree.
    pub max_depth: Option<usize>,

    /// Bits per bitmapset word in the inspected build
    pub bitmapword_bits: u32,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            indent_unit: "\t".to_string(),
            max_depth: None,
            bitmapword_bits: 32,
        }
    }
}

impl InspectConfig {
    /// Load a JSON config file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> InspectResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: InspectConfig = serde_json::from_str(&text)?;
        log::debug!("Loaded config from {}: {:?}", path.as_ref().display(), config);
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
