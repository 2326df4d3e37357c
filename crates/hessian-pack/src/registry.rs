//! Per-session reference, class-definition and type tables.
//!
//! One [`ReferenceRegistry`] governs one reference-numbering space. Indexes
//! only ever grow during a session; sharing a registry between unrelated
//! messages would make their back-references alias each other.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::value::Shared;

/// Identity token of a composite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub(crate) fn from_ptr(ptr: *const ()) -> Self {
        ObjectId(ptr as usize)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Shape of a record: type name plus ordered field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassDef {
    pub type_name: String,
    pub fields: Vec<String>,
}

impl ClassDef {
    pub fn new(type_name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }
}

#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    seen: HashMap<ObjectId, u32>,
    // Registered nodes are kept alive so their addresses cannot be reused by
    // another node within the session.
    anchors: Vec<Rc<dyn Any>>,
    class_defs: Vec<ClassDef>,
    class_index: HashMap<ClassDef, u32>,
    types: Vec<String>,
    type_index: HashMap<String, u32>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference index of an already written composite.
    pub fn get_reference(&self, id: ObjectId) -> Option<u32> {
        self.seen.get(&id).copied()
    }

    /// Registers a composite and returns its reference index.
    pub fn register<T: 'static>(&mut self, node: &Shared<T>) -> u32 {
        let index = self.anchors.len() as u32;
        self.seen.insert(node.id(), index);
        self.anchors.push(node.anchor());
        trace!(index, id = %node.id(), "registered reference");
        index
    }

    /// Number of registered composites.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn get_class_index(&self, shape: &ClassDef) -> Option<u32> {
        self.class_index.get(shape).copied()
    }

    /// Appends a class definition and returns its index.
    pub fn add_class_def(&mut self, def: ClassDef) -> u32 {
        if let Some(index) = self.class_index.get(&def) {
            return *index;
        }
        let index = self.class_defs.len() as u32;
        self.class_index.insert(def.clone(), index);
        trace!(index, type_name = %def.type_name, fields = def.fields.len(), "added class definition");
        self.class_defs.push(def);
        index
    }

    pub fn class_def(&self, index: u32) -> Option<&ClassDef> {
        self.class_defs.get(index as usize)
    }

    pub fn class_defs(&self) -> &[ClassDef] {
        &self.class_defs
    }

    pub fn get_type_index(&self, type_name: &str) -> Option<u32> {
        self.type_index.get(type_name).copied()
    }

    /// Appends a type name and returns its index.
    pub fn add_type(&mut self, type_name: &str) -> u32 {
        if let Some(index) = self.type_index.get(type_name) {
            return *index;
        }
        let index = self.types.len() as u32;
        self.types.push(type_name.to_owned());
        self.type_index.insert(type_name.to_owned(), index);
        index
    }

    /// Drops every table, starting a fresh numbering space.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.anchors.clear();
        self.class_defs.clear();
        self.class_index.clear();
        self.types.clear();
        self.type_index.clear();
    }
}
