//! Programmatic heap snapshots
//!
//! Node records are stored with their tag symbol in the `type` field and the
//! bare tag as shape name. Plan nodes get every common Plan field so a test
//! only has to spell out what it cares about.

use pgprint::format::ElementKind;
use pgprint::{DispatchTable, Formatter, Handle, InspectConfig, SnapshotMemory, Value};

/// Pointer field value
pub fn ptr(handle: Handle) -> Value {
    Value::Handle(handle)
}

/// NULL pointer field value
pub fn null() -> Value {
    Value::Handle(Handle::NULL)
}

/// Enumerator field value
pub fn en(name: &str) -> Value {
    Value::Enum(name.to_string())
}

/// C string field value
pub fn cstr(text: &str) -> Value {
    Value::Str(Some(text.to_string()))
}

/// Builder for an in-memory snapshot
pub struct SnapshotFixture {
    mem: SnapshotMemory,
    next: u64,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        Self {
            mem: SnapshotMemory::new(),
            next: 0x1000,
        }
    }

    fn alloc(&mut self) -> Handle {
        let handle = Handle::new(self.next);
        self.next += 0x40;
        handle
    }

    /// Untagged record, e.g. a ListCell or Bitmapset
    pub fn record(&mut self, shape: &str, fields: Vec<(&str, Value)>) -> Handle {
        let handle = self.alloc();
        self.mem.insert(handle, shape, fields);
        handle
    }

    /// Tagged node record; `tag` is the bare tag name
    pub fn node(&mut self, tag: &str, mut fields: Vec<(&str, Value)>) -> Handle {
        let symbol = format!("T_{}", tag);
        fields.insert(0, ("type", Value::Enum(symbol)));
        self.record(tag, fields)
    }

    /// Node list holding `items` in order
    pub fn list(&mut self, items: &[Handle]) -> Handle {
        let values: Vec<Value> = items.iter().map(|h| ptr(*h)).collect();
        self.list_of("List", ElementKind::Node, values)
    }

    pub fn int_list(&mut self, items: &[i64]) -> Handle {
        let values = items.iter().map(|v| Value::Int(*v)).collect();
        self.list_of("IntList", ElementKind::Int, values)
    }

    pub fn oid_list(&mut self, items: &[i64]) -> Handle {
        let values = items.iter().map(|v| Value::Int(*v)).collect();
        self.list_of("OidList", ElementKind::Oid, values)
    }

    fn list_of(&mut self, tag: &str, kind: ElementKind, values: Vec<Value>) -> Handle {
        let field = match kind {
            ElementKind::Node => "ptr_value",
            ElementKind::Int => "int_value",
            ElementKind::Oid => "oid_value",
        };

        let length = Value::Int(values.len() as i64);
        let mut next = Handle::NULL;
        for value in values.into_iter().rev() {
            next = self.record("ListCell", vec![(field, value), ("next", ptr(next))]);
        }
        self.node(tag, vec![("length", length), ("head", ptr(next))])
    }

    /// Plan node with zero costs, no target list and the given children
    pub fn plan(&mut self, tag: &str, id: i64, lefttree: Handle, righttree: Handle) -> Handle {
        self.plan_with(
            tag,
            id,
            vec![("lefttree", ptr(lefttree)), ("righttree", ptr(righttree))],
        )
    }

    /// Plan node whose common fields are overridden by `extra`
    pub fn plan_with(&mut self, tag: &str, id: i64, extra: Vec<(&str, Value)>) -> Handle {
        let mut fields = vec![
            ("startup_cost", Value::Float(0.0)),
            ("total_cost", Value::Float(10.5)),
            ("plan_rows", Value::Float(100.0)),
            ("plan_width", Value::Int(4)),
            ("plan_node_id", Value::Int(id)),
            ("targetlist", null()),
            ("initPlan", null()),
            ("qual", null()),
            ("lefttree", null()),
            ("righttree", null()),
        ];
        fields.extend(extra);
        self.node(tag, fields)
    }

    /// Leaf scan with no children
    pub fn leaf(&mut self, tag: &str, id: i64) -> Handle {
        self.plan(tag, id, Handle::NULL, Handle::NULL)
    }

    pub fn var(&mut self, varno: i64, varattno: i64) -> Handle {
        self.node(
            "Var",
            vec![
                ("varno", Value::Int(varno)),
                ("varattno", Value::Int(varattno)),
                ("varlevelsup", Value::Int(0)),
            ],
        )
    }

    pub fn constant(&mut self, consttype: i64, value: i64) -> Handle {
        self.node(
            "Const",
            vec![
                ("consttype", Value::Int(consttype)),
                ("consttypmod", Value::Int(-1)),
                ("constlen", Value::Int(4)),
                ("constvalue", Value::Int(value)),
                ("constisnull", Value::Bool(false)),
                ("constbyval", Value::Bool(true)),
            ],
        )
    }

    pub fn integer(&mut self, ival: i64) -> Handle {
        self.node("Integer", vec![("ival", Value::Int(ival))])
    }

    pub fn string(&mut self, text: &str) -> Handle {
        self.node("String", vec![("str", cstr(text))])
    }

    pub fn op_expr(&mut self, tag: &str, opno: i64, args: &[Handle]) -> Handle {
        let args = self.list(args);
        self.node(
            tag,
            vec![
                ("opno", Value::Int(opno)),
                ("opfuncid", Value::Int(65)),
                ("opresulttype", Value::Int(16)),
                ("args", ptr(args)),
            ],
        )
    }

    pub fn target_entry(&mut self, resno: i64, resname: Option<&str>, expr: Handle) -> Handle {
        self.node(
            "TargetEntry",
            vec![
                ("resno", Value::Int(resno)),
                ("resname", Value::Str(resname.map(str::to_string))),
                ("resorigtbl", Value::Int(16384)),
                ("resorigcol", Value::Int(resno)),
                ("resjunk", Value::Bool(false)),
                ("expr", ptr(expr)),
            ],
        )
    }

    pub fn symbol(&mut self, name: &str, handle: Handle) {
        self.mem.define_symbol(name, ptr(handle));
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.mem.define_symbol(name, value);
    }

    pub fn memory(&self) -> &SnapshotMemory {
        &self.mem
    }

    /// Render a node with the standard table and default config
    pub fn render(&self, handle: Handle) -> String {
        self.render_with(handle, &InspectConfig::default())
    }

    pub fn render_with(&self, handle: Handle, config: &InspectConfig) -> String {
        let formatter = Formatter::new(&self.mem, DispatchTable::global(), config);
        formatter.node(handle).unwrap()
    }
}

impl Default for SnapshotFixture {
    fn default() -> Self {
        Self::new()
    }
}
