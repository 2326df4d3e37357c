//! Pre-serialization hooks for record values.
//!
//! A filter sees a record before the encoder dispatches it and returns the
//! value to write instead: the record itself, a value of another kind, or a
//! [`Value::Raw`] carrying bytes the filter already encoded (typically with
//! [`Hessian2Encoder::encode_fragment`]).

use std::fmt;

use crate::hessian2::{EncodeError, Hessian2Encoder};
use crate::value::Value;

pub trait Filter {
    /// Whether this filter wants to handle `value`.
    fn accepts(&self, value: &Value) -> bool;

    /// Produces the value to encode in place of `value`.
    fn apply(&self, value: &Value, encoder: &mut Hessian2Encoder) -> Result<Value, EncodeError>;
}

/// Filter for records of one type, backed by a closure.
pub struct TypeFilter<F> {
    type_name: String,
    callback: F,
}

impl<F> TypeFilter<F>
where
    F: Fn(&Value, &mut Hessian2Encoder) -> Result<Value, EncodeError>,
{
    pub fn new(type_name: impl Into<String>, callback: F) -> Self {
        Self {
            type_name: type_name.into(),
            callback,
        }
    }
}

impl<F> Filter for TypeFilter<F>
where
    F: Fn(&Value, &mut Hessian2Encoder) -> Result<Value, EncodeError>,
{
    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Record(record) => record.borrow().type_name == self.type_name,
            _ => false,
        }
    }

    fn apply(&self, value: &Value, encoder: &mut Hessian2Encoder) -> Result<Value, EncodeError> {
        (self.callback)(value, encoder)
    }
}

/// Ordered set of filters; the first one accepting a value wins.
#[derive(Default)]
pub struct FilterContainer {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: impl Filter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.add(filter);
        self
    }

    /// Registers a closure for records named `type_name`.
    pub fn on_type<F>(self, type_name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Value, &mut Hessian2Encoder) -> Result<Value, EncodeError> + 'static,
    {
        self.with(TypeFilter::new(type_name, callback))
    }

    /// The filter responsible for `value`, if any.
    pub fn callback(&self, value: &Value) -> Option<&dyn Filter> {
        self.filters
            .iter()
            .find(|filter| filter.accepts(value))
            .map(|filter| filter.as_ref())
    }

    pub fn invoke(
        &self,
        callback: &dyn Filter,
        value: &Value,
        encoder: &mut Hessian2Encoder,
    ) -> Result<Value, EncodeError> {
        callback.apply(value, encoder)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContainer")
            .field("filters", &self.filters.len())
            .finish()
    }
}
