// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Read-only access to inspected process memory
//!
//! Renderers never touch raw memory. They go through [`MemoryAccessor`], which
//! hands out immutable [`Value`] snapshots of individual fields after a handle
//! has been reinterpreted as a named record shape.

pub mod snapshot;

use crate::error::{InspectError, InspectResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use snapshot::{SnapshotFile, SnapshotMemory};

/// Name of the discriminator field carried by every node record
pub const TAG_FIELD: &str = "type";

/// Opaque address of a record in inspected memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub fn new(address: u64) -> Self {
        Handle(address)
    }

    pub fn address(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A handle that has been reinterpreted as a specific record shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedHandle {
    pub handle: Handle,
    pub shape: String,
}

/// Snapshot of a single field read from inspected memory
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// C string; `None` when the pointer is NULL
    Str(Option<String>),
    /// Enumerator name, e.g. `CMD_SELECT` or `T_SeqScan`
    Enum(String),
    /// Pointer to another record, including list containers
    Handle(Handle),
    Array(Vec<Value>),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Enum(_) => "enum",
            Value::Handle(_) => "handle",
            Value::Array(_) => "array",
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Handle(h) => Some(*h),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(Some(s)) => write!(f, "\"{}\"", s),
            Value::Str(None) => write!(f, "(NULL)"),
            Value::Enum(name) => write!(f, "{}", name),
            Value::Handle(h) => write!(f, "{}", h),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Contract between the rendering engine and the inspection environment
///
/// Every call is a pure read. `reinterpret` must precede `field`, and callers
/// only reinterpret a handle as a shape consistent with its own tag.
pub trait MemoryAccessor {
    /// Discriminator symbol of the record, or `None` if its shape has no tag field
    fn tag_of(&self, handle: Handle) -> InspectResult<Option<String>>;

    /// Reinterpret a handle as the named record shape
    ///
    /// Fails only when the runtime cannot resolve `shape`.
    fn reinterpret(&self, handle: Handle, shape: &str) -> InspectResult<TypedHandle>;

    /// Read a named field through a reinterpreted handle
    fn field(&self, typed: &TypedHandle, name: &str) -> InspectResult<Value>;

    fn is_null(&self, handle: Handle) -> bool {
        handle.is_null()
    }
}

/// Turns a textual debugger expression into a value
pub trait ExpressionEvaluator {
    fn evaluate(&self, expr: &str) -> InspectResult<Value>;
}

/// Field reads against one reinterpreted record
///
/// Typed getters convert the raw [`Value`] and report a [`InspectError::FieldType`]
/// when the stored representation does not match.
#[derive(Clone)]
pub struct View<'a> {
    mem: &'a dyn MemoryAccessor,
    typed: TypedHandle,
}

impl<'a> View<'a> {
    pub fn new(mem: &'a dyn MemoryAccessor, handle: Handle, shape: &str) -> InspectResult<Self> {
        let typed = mem.reinterpret(handle, shape)?;
        Ok(Self { mem, typed })
    }

    pub fn handle(&self) -> Handle {
        self.typed.handle
    }

    pub fn shape(&self) -> &str {
        &self.typed.shape
    }

    pub fn value(&self, name: &str) -> InspectResult<Value> {
        self.mem.field(&self.typed, name)
    }

    /// Field rendered the way a debugger prints a raw value
    pub fn show(&self, name: &str) -> InspectResult<String> {
        Ok(self.value(name)?.to_string())
    }

    pub fn int(&self, name: &str) -> InspectResult<i64> {
        match self.value(name)? {
            Value::Int(v) => Ok(v),
            Value::Bool(b) => Ok(b as i64),
            other => Err(type_error(name, "integer", &other)),
        }
    }

    pub fn float(&self, name: &str) -> InspectResult<f64> {
        match self.value(name)? {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(type_error(name, "float", &other)),
        }
    }

    /// C `bool` fields are stored as bytes; only 1 counts as true
    pub fn flag(&self, name: &str) -> InspectResult<bool> {
        match self.value(name)? {
            Value::Bool(b) => Ok(b),
            Value::Int(v) => Ok(v == 1),
            other => Err(type_error(name, "boolean", &other)),
        }
    }

    pub fn pointer(&self, name: &str) -> InspectResult<Handle> {
        match self.value(name)? {
            Value::Handle(h) => Ok(h),
            Value::Int(0) => Ok(Handle::NULL),
            other => Err(type_error(name, "handle", &other)),
        }
    }

    pub fn text(&self, name: &str) -> InspectResult<Option<String>> {
        match self.value(name)? {
            Value::Str(s) => Ok(s),
            Value::Handle(h) if h.is_null() => Ok(None),
            other => Err(type_error(name, "string", &other)),
        }
    }

    pub fn array(&self, name: &str) -> InspectResult<Vec<Value>> {
        match self.value(name)? {
            Value::Array(items) => Ok(items),
            Value::Handle(h) if h.is_null() => Ok(Vec::new()),
            other => Err(type_error(name, "array", &other)),
        }
    }

    /// True when a pointer field is non-null
    pub fn is_set(&self, name: &str) -> InspectResult<bool> {
        Ok(!self.mem.is_null(self.pointer(name)?))
    }
}

fn type_error(field: &str, expected: &'static str, found: &Value) -> InspectError {
    InspectError::FieldType {
        field: field.to_string(),
        expected,
        found: found.kind_name(),
    }
}
