// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for memory inspection and node rendering

use crate::memory::Handle;
use thiserror::Error;

/// Failures raised while reading inspected memory.
///
/// Absent children and unsupported tags are not errors: renderers substitute
/// sentinels for those. Anything here means the accessor contract was broken
/// or the inspection environment is misconfigured.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Field '{field}' not found in shape '{shape}'")]
    FieldNotFound { shape: String, field: String },

    #[error("Field '{field}' holds {found}, expected {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No record at address {0}")]
    DanglingHandle(Handle),

    #[error("Cannot resolve expression: {0}")]
    Unresolved(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for InspectError {
    fn from(err: std::io::Error) -> Self {
        InspectError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InspectError {
    fn from(err: serde_json::Error) -> Self {
        InspectError::Json(err.to_string())
    }
}

pub type InspectResult<T> = Result<T, InspectError>;
