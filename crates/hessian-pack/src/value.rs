//! [`Value`] — the in-memory values the Hessian writer serializes.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use crate::registry::ObjectId;

/// Handle to a composite node with identity.
///
/// Cloning a `Shared` aliases the same node; the reference registry keys on
/// that identity, so a node reached twice (or through a cycle) is written once
/// and back-referenced afterwards. Equality is identity equality.
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Identity token of this node, stable for as long as any handle lives.
    pub fn id(&self) -> ObjectId {
        ObjectId::from_ptr(Rc::as_ptr(&self.0).cast::<()>())
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutable access, used to close cycles after construction.
    ///
    /// # Panics
    ///
    /// Panics if the node is currently borrowed, e.g. while it is being encoded.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn anchor(&self) -> Rc<dyn Any>
    where
        T: 'static,
    {
        self.0.clone()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Cyclic graphs must not recurse while formatting.
impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({})", self.id())
    }
}

/// Key/value container. A map with a type name is always written as a typed
/// map; an untyped one may be written as a list when its keys are `0..n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub type_name: Option<String>,
    pub entries: Vec<(Value, Value)>,
}

/// Structured record: a named type with ordered, named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub type_name: String,
    pub fields: Vec<(String, Value)>,
}

impl Record {
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// External resource whose contents are written as binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// A plain file on disk.
    File(PathBuf),
    /// Any other kind of handle (socket, pipe, process...). Never encodable.
    Stream { kind: String },
}

/// Every value kind the Hessian writer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Double(f64),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    /// UTF-8 bytes; validated when written.
    Text(Vec<u8>),
    Binary(Vec<u8>),
    List(Shared<Vec<Value>>),
    Map(Shared<Map>),
    Record(Shared<Record>),
    Resource(Resource),
    /// Pre-encoded Hessian bytes, written as-is.
    Raw(Vec<u8>),
}

impl Value {
    pub fn text(s: &str) -> Self {
        Value::Text(s.as_bytes().to_vec())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Shared::new(Map {
            type_name: None,
            entries,
        }))
    }

    pub fn typed_map(type_name: impl Into<String>, entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Shared::new(Map {
            type_name: Some(type_name.into()),
            entries,
        }))
    }

    pub fn record<N: Into<String>>(type_name: impl Into<String>, fields: Vec<(N, Value)>) -> Self {
        Value::Record(Shared::new(Record {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }))
    }

    /// Short name of the value kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Date(_) => "date",
            Value::Text(_) => "text",
            Value::Binary(_) => "binary",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Resource(_) => "resource",
            Value::Raw(_) => "raw",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::text(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

/// Member naming the record type of a JSON object.
pub const TYPE_KEY: &str = "$type";
/// Sole member of a JSON object standing for a date in epoch milliseconds.
pub const DATE_KEY: &str = "$date";

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64().map(i32::try_from) {
                Some(Ok(i)) => Value::Int(i),
                _ => Value::Double(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(arr) => {
                Value::list(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(mut obj) => {
                if obj.len() == 1 {
                    if let Some(ms) = obj.get(DATE_KEY).and_then(serde_json::Value::as_i64) {
                        return Value::Date(ms);
                    }
                }
                if matches!(obj.get(TYPE_KEY), Some(serde_json::Value::String(_))) {
                    if let Some(serde_json::Value::String(type_name)) = obj.shift_remove(TYPE_KEY) {
                        return Value::record(
                            type_name,
                            obj.into_iter()
                                .map(|(k, v)| (k, Value::from(v)))
                                .collect(),
                        );
                    }
                }
                Value::map(
                    obj.into_iter()
                        .map(|(k, v)| (Value::from(k), Value::from(v)))
                        .collect(),
                )
            }
        }
    }
}
