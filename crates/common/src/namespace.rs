//! # Script Namespaces
//!
//! Read-only views over the identifier space of the embedded scripting runtime.
//!
//! A namespace node exposes its child names and lets callers step into children
//! that are themselves namespaces. Adapters never run script code: Luau tables are
//! read with raw access, and class-style inheritance is followed only where a
//! metatable's `__index` is itself a table. `__index` functions and `__pairs`
//! are never invoked.

use mlua::{Lua, Table, Value};
use std::collections::HashSet;

use crate::autocomplete::DEFAULT_MAX_DEPTH;

/// Capability interface for a node in a dynamically enumerable namespace.
pub trait NamespaceNode: Sized {
    /// All property names of this node, in no particular order.
    fn child_names(&self) -> Vec<String>;

    /// The child called `name`, if it exists and is itself a namespace node.
    fn child(&self, name: &str) -> Option<Self>;
}

// ============================================================================
// Luau
// ============================================================================

/// Namespace adapter over a Luau table.
#[derive(Clone, Debug)]
pub struct LuaNamespace {
    table: Table,
}

impl LuaNamespace {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// The global environment of `lua`.
    pub fn globals(lua: &Lua) -> Self {
        Self::new(lua.globals())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

/// Text form of a table key. Keys without a name form (tables, functions,
/// booleans) are not completable and yield `None`.
fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.to_string_lossy().to_string()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Number(n) if n.fract() == 0.0 && n.abs() < I64_BOUND => {
            Some(format!("{}", *n as i64))
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Magnitude below which an integral float converts to `i64` exactly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl LuaNamespace {
    /// This table followed by every table reachable through `__index`.
    /// Function `__index` handlers are never called; the chain stops there.
    fn index_chain(&self) -> Vec<Table> {
        let mut chain = vec![self.table.clone()];
        let mut seen = HashSet::from([self.table.to_pointer()]);

        while chain.len() < DEFAULT_MAX_DEPTH {
            let Some(meta) = chain[chain.len() - 1].metatable() else {
                break;
            };
            let index: Value = meta.raw_get("__index").unwrap_or(Value::Nil);
            let Value::Table(parent) = index else {
                break;
            };
            if !seen.insert(parent.to_pointer()) {
                break;
            }
            chain.push(parent);
        }
        chain
    }
}

/// Raw lookup of `name`, trying it as an array index when no string key exists
fn raw_child(table: &Table, name: &str) -> Value {
    let value: Value = table.raw_get(name).unwrap_or(Value::Nil);
    if !value.is_nil() {
        return value;
    }
    match name.parse::<i64>() {
        Ok(index) => table.raw_get(index).unwrap_or(Value::Nil),
        Err(_) => Value::Nil,
    }
}

impl NamespaceNode for LuaNamespace {
    fn child_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for table in self.index_chain() {
            let walked = table.for_each(|key: Value, _value: Value| {
                // Inherited names shadowed by an own key are listed once
                if let Some(name) = key_name(&key) {
                    if seen.insert(name.clone()) {
                        names.push(name);
                    }
                }
                Ok(())
            });
            if let Err(e) = walked {
                tracing::debug!(target: "lantern::namespace", "table walk stopped early: {}", e);
            }
        }
        names
    }

    fn child(&self, name: &str) -> Option<Self> {
        let value = self
            .index_chain()
            .iter()
            .map(|table| raw_child(table, name))
            .find(|value| !value.is_nil())?;
        match value {
            Value::Table(table) => Some(Self::new(table)),
            _ => None,
        }
    }
}

// ============================================================================
// JSON snapshots
// ============================================================================

/// Objects are namespace nodes; every other JSON value is a leaf.
impl<'a> NamespaceNode for &'a serde_json::Value {
    fn child_names(&self) -> Vec<String> {
        self.as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn child(&self, name: &str) -> Option<Self> {
        let value: &'a serde_json::Value = *self;
        value.as_object()?.get(name).filter(|v| v.is_object())
    }
}
