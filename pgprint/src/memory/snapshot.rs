// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Heap snapshot accessor
//!
//! A snapshot is a JSON document captured from a debugger session: named
//! symbols plus every record reachable from them, keyed by address. Field
//! encodings:
//!
//! - number / bool: integer, float or boolean scalar
//! - `null`: NULL pointer
//! - `{"ptr": "0x..."}`: pointer to another record
//! - `{"enum": "NAME"}`: enumerator
//! - `{"str": "..."}`: C string (`{"str": null}` for a NULL `char *`)
//! - `[...]`: fixed array

use super::{ExpressionEvaluator, Handle, MemoryAccessor, TypedHandle, Value, TAG_FIELD};
use crate::error::{InspectError, InspectResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

static CAST_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\(\s*(?:struct\s+)?[A-Za-z_][A-Za-z0-9_]*\s*\*\s*\)")
        .expect("cast prefix pattern is valid")
});

static BASE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(0[xX][0-9a-fA-F]+|[0-9]+|[A-Za-z_][A-Za-z0-9_]*)")
        .expect("base token pattern is valid")
});

static MEMBER_ACCESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(->|\.)\s*([A-Za-z_][A-Za-z0-9_]*)").expect("member pattern is valid")
});

/// Address as written in a snapshot: integer or `"0x..."` / decimal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Int(u64),
    Text(String),
}

impl Address {
    fn resolve(&self) -> InspectResult<Handle> {
        match self {
            Address::Int(v) => Ok(Handle::new(*v)),
            Address::Text(s) => parse_address(s)
                .map(Handle::new)
                .ok_or_else(|| InspectError::Json(format!("invalid address '{}'", s))),
        }
    }
}

/// On-disk encoding of a field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRepr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Ptr {
        ptr: Address,
    },
    Enum {
        #[serde(rename = "enum")]
        name: String,
    },
    Str {
        #[serde(rename = "str")]
        text: Option<String>,
    },
    Array(Vec<FieldRepr>),
}

impl FieldRepr {
    fn decode(&self) -> InspectResult<Value> {
        Ok(match self {
            FieldRepr::Null => Value::Handle(Handle::NULL),
            FieldRepr::Bool(b) => Value::Bool(*b),
            FieldRepr::Int(v) => Value::Int(*v),
            FieldRepr::Float(v) => Value::Float(*v),
            FieldRepr::Ptr { ptr } => Value::Handle(ptr.resolve()?),
            FieldRepr::Enum { name } => Value::Enum(name.clone()),
            FieldRepr::Str { text } => Value::Str(text.clone()),
            FieldRepr::Array(items) => Value::Array(
                items
                    .iter()
                    .map(FieldRepr::decode)
                    .collect::<InspectResult<Vec<_>>>()?,
            ),
        })
    }
}

/// One record of the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRepr {
    pub shape: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRepr>,
}

/// Serialized heap snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub symbols: BTreeMap<String, FieldRepr>,
    /// Record shapes known to the runtime; absent means any shape resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<BTreeSet<String>>,
    #[serde(default)]
    pub records: BTreeMap<String, RecordRepr>,
}

#[derive(Debug, Clone)]
struct Record {
    shape: String,
    fields: HashMap<String, Value>,
}

/// [`MemoryAccessor`] over a decoded heap snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotMemory {
    symbols: BTreeMap<String, Value>,
    shapes: Option<BTreeSet<String>>,
    records: HashMap<Handle, Record>,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a parsed snapshot document
    pub fn from_file(file: SnapshotFile) -> InspectResult<Self> {
        let mut memory = Self {
            shapes: file.shapes,
            ..Self::default()
        };

        for (name, repr) in &file.symbols {
            memory.symbols.insert(name.clone(), repr.decode()?);
        }

        for (address, record) in &file.records {
            let handle = Address::Text(address.clone()).resolve()?;
            let mut fields = HashMap::with_capacity(record.fields.len());
            for (name, repr) in &record.fields {
                fields.insert(name.clone(), repr.decode()?);
            }
            memory.records.insert(
                handle,
                Record {
                    shape: record.shape.clone(),
                    fields,
                },
            );
        }

        log::debug!(
            "Loaded snapshot with {} records and {} symbols",
            memory.records.len(),
            memory.symbols.len()
        );
        Ok(memory)
    }

    pub fn from_json(text: &str) -> InspectResult<Self> {
        let file: SnapshotFile = serde_json::from_str(text)?;
        Self::from_file(file)
    }

    pub fn load(path: impl AsRef<Path>) -> InspectResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::info!("Reading heap snapshot from {}", path.as_ref().display());
        Self::from_json(&text)
    }

    /// Add or replace a record
    pub fn insert(&mut self, handle: Handle, shape: &str, fields: Vec<(&str, Value)>) {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.records.insert(
            handle,
            Record {
                shape: shape.to_string(),
                fields,
            },
        );
    }

    pub fn define_symbol(&mut self, name: &str, value: Value) {
        self.symbols.insert(name.to_string(), value);
    }

    /// Restrict reinterpretation to the given shape names
    pub fn declare_shapes<I, S>(&mut self, shapes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shapes = Some(shapes.into_iter().map(Into::into).collect());
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.symbols.iter()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Shape name the record was captured with
    pub fn shape_of(&self, handle: Handle) -> Option<&str> {
        self.records.get(&handle).map(|r| r.shape.as_str())
    }

    fn record(&self, handle: Handle) -> InspectResult<&Record> {
        self.records
            .get(&handle)
            .ok_or(InspectError::DanglingHandle(handle))
    }
}

impl MemoryAccessor for SnapshotMemory {
    fn tag_of(&self, handle: Handle) -> InspectResult<Option<String>> {
        if handle.is_null() {
            return Ok(None);
        }
        let record = self.record(handle)?;
        Ok(match record.fields.get(TAG_FIELD) {
            Some(Value::Enum(tag)) => Some(tag.clone()),
            Some(Value::Str(Some(tag))) => Some(tag.clone()),
            _ => None,
        })
    }

    fn reinterpret(&self, handle: Handle, shape: &str) -> InspectResult<TypedHandle> {
        if let Some(shapes) = &self.shapes {
            if !shapes.contains(shape) {
                return Err(InspectError::UnknownShape(shape.to_string()));
            }
        }
        Ok(TypedHandle {
            handle,
            shape: shape.to_string(),
        })
    }

    fn field(&self, typed: &TypedHandle, name: &str) -> InspectResult<Value> {
        log::trace!("read {}->{} ({})", typed.handle, name, typed.shape);
        let record = self.record(typed.handle)?;
        record
            .fields
            .get(name)
            .cloned()
            .ok_or_else(|| InspectError::FieldNotFound {
                shape: typed.shape.clone(),
                field: name.to_string(),
            })
    }
}

impl ExpressionEvaluator for SnapshotMemory {
    /// Resolve `symbol`, an address literal, or a member chain such as
    /// `stmt->planTree->lefttree`. A leading pointer cast is accepted and ignored.
    fn evaluate(&self, expr: &str) -> InspectResult<Value> {
        let unresolved = || InspectError::Unresolved(expr.to_string());

        let mut rest = match CAST_PREFIX.find(expr) {
            Some(m) => &expr[m.end()..],
            None => expr,
        };

        let base = BASE_TOKEN.captures(rest).ok_or_else(unresolved)?;
        let token = &base[1];
        let mut value = match parse_address(token) {
            Some(address) => Value::Handle(Handle::new(address)),
            None => self.symbols.get(token).cloned().ok_or_else(unresolved)?,
        };
        rest = &rest[base[0].len()..];

        while let Some(member) = MEMBER_ACCESS.captures(rest) {
            let name = &member[2];
            let handle = match value.as_handle() {
                Some(h) if !h.is_null() => h,
                _ => {
                    return Err(InspectError::Unresolved(format!(
                        "{}: cannot read '{}' through a non-pointer or NULL value",
                        expr, name
                    )))
                }
            };
            let record = self.record(handle)?;
            value = record
                .fields
                .get(name)
                .cloned()
                .ok_or_else(|| InspectError::FieldNotFound {
                    shape: record.shape.clone(),
                    field: name.to_string(),
                })?;
            rest = &rest[member[0].len()..];
        }

        if !rest.trim().is_empty() {
            return Err(unresolved());
        }
        Ok(value)
    }
}

/// Parse `0x`-prefixed hexadecimal or plain decimal addresses
pub fn parse_address(text: &str) -> Option<u64> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => text.parse().ok(),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "symbols": { "stmt": { "ptr": "0x100" }, "count": 3 },
        "records": {
            "0x100": { "shape": "PlannedStmt", "fields": {
                "type": { "enum": "T_PlannedStmt" },
                "planTree": { "ptr": "0x200" },
                "utilityStmt": null
            }},
            "0x200": { "shape": "SeqScan", "fields": {
                "type": { "enum": "T_SeqScan" },
                "plan_rows": 10.5,
                "plan_width": 4,
                "relname": { "str": "t1" },
                "paratts": [1, 2]
            }},
            "512": { "shape": "ListCell", "fields": { "int_value": 7, "next": null } }
        }
    }"#;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x1f"), Some(31));
        assert_eq!(parse_address("0X10"), Some(16));
        assert_eq!(parse_address("42"), Some(42));
        assert_eq!(parse_address("plan"), None);
        assert_eq!(parse_address(""), None);
    }

    #[test]
    fn test_decode_snapshot_fields() {
        let mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        assert_eq!(mem.record_count(), 3);

        let scan = mem.reinterpret(Handle::new(0x200), "Plan").unwrap();
        assert_eq!(mem.field(&scan, "plan_rows").unwrap(), Value::Float(10.5));
        assert_eq!(mem.field(&scan, "plan_width").unwrap(), Value::Int(4));
        assert_eq!(
            mem.field(&scan, "relname").unwrap(),
            Value::Str(Some("t1".to_string()))
        );
        assert_eq!(
            mem.field(&scan, "paratts").unwrap(),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );

        let cell = mem.reinterpret(Handle::new(512), "ListCell").unwrap();
        assert_eq!(mem.field(&cell, "next").unwrap(), Value::Handle(Handle::NULL));
    }

    #[test]
    fn test_tag_of() {
        let mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        assert_eq!(
            mem.tag_of(Handle::new(0x200)).unwrap().as_deref(),
            Some("T_SeqScan")
        );
        assert_eq!(mem.tag_of(Handle::new(512)).unwrap(), None);
        assert_eq!(mem.tag_of(Handle::NULL).unwrap(), None);
        assert!(matches!(
            mem.tag_of(Handle::new(0xdead)),
            Err(InspectError::DanglingHandle(_))
        ));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        let scan = mem.reinterpret(Handle::new(0x200), "SeqScan").unwrap();
        let err = mem.field(&scan, "qual").unwrap_err();
        assert!(matches!(err, InspectError::FieldNotFound { .. }));
    }

    #[test]
    fn test_declared_shapes_restrict_reinterpret() {
        let mut mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        mem.declare_shapes(["Plan", "List"]);
        assert!(mem.reinterpret(Handle::new(0x200), "Plan").is_ok());
        assert!(matches!(
            mem.reinterpret(Handle::new(0x200), "NoSuchStruct"),
            Err(InspectError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_evaluate_expressions() {
        let mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        assert_eq!(
            mem.evaluate("stmt").unwrap(),
            Value::Handle(Handle::new(0x100))
        );
        assert_eq!(
            mem.evaluate("stmt->planTree").unwrap(),
            Value::Handle(Handle::new(0x200))
        );
        assert_eq!(
            mem.evaluate("(Plan *) stmt->planTree.plan_width").unwrap(),
            Value::Int(4)
        );
        assert_eq!(
            mem.evaluate("0x200").unwrap(),
            Value::Handle(Handle::new(0x200))
        );
        assert_eq!(mem.evaluate("count").unwrap(), Value::Int(3));
    }

    #[test]
    fn test_evaluate_failures() {
        let mem = SnapshotMemory::from_json(SNAPSHOT).unwrap();
        assert!(matches!(
            mem.evaluate("nosuch"),
            Err(InspectError::Unresolved(_))
        ));
        assert!(matches!(
            mem.evaluate("stmt->utilityStmt->type"),
            Err(InspectError::Unresolved(_))
        ));
        assert!(matches!(
            mem.evaluate("stmt + 1"),
            Err(InspectError::Unresolved(_))
        ));
        assert!(matches!(
            mem.evaluate("stmt->bogus"),
            Err(InspectError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heap.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let mem = SnapshotMemory::load(&path).unwrap();
        assert_eq!(mem.shape_of(Handle::new(0x100)), Some("PlannedStmt"));
        assert_eq!(mem.symbols().count(), 2);
    }
}
