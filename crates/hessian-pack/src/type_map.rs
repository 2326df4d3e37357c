//! Local type name to wire type name mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Resolves the type name written on the wire for a local type.
pub trait TypeResolver {
    /// Wire name for `local_type`, or `None` to write the local name as-is.
    fn remote_type(&self, local_type: &str) -> Option<&str>;
}

/// Table-backed [`TypeResolver`].
///
/// ```
/// use hessian_pack::{TypeMap, TypeResolver};
///
/// let types = TypeMap::new().with("User", "com.example.User");
/// assert_eq!(types.remote_type("User"), Some("com.example.User"));
/// assert_eq!(types.remote_type("Order"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    mappings: HashMap<String, String>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, local_type: impl Into<String>, remote_type: impl Into<String>) -> Self {
        self.insert(local_type, remote_type);
        self
    }

    pub fn insert(&mut self, local_type: impl Into<String>, remote_type: impl Into<String>) {
        self.mappings.insert(local_type.into(), remote_type.into());
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl TypeResolver for TypeMap {
    fn remote_type(&self, local_type: &str) -> Option<&str> {
        self.mappings.get(local_type).map(String::as_str)
    }
}
