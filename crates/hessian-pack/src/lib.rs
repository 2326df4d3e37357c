//! Hessian 2 binary serialization.
//!
//! [`Hessian2Encoder`] turns [`Value`]s into Hessian 2.0 bytes: compact
//! integers, doubles and dates, UTF-16 measured strings, chunked binary,
//! lists, maps and records with class-definition caching, and
//! back-references for composites written earlier in the same session.
//!
//! ```
//! use hessian_pack::{Hessian2Encoder, Value};
//!
//! let mut encoder = Hessian2Encoder::new();
//! let point = Value::record("Point", vec![("x", Value::Int(1)), ("y", Value::Int(2))]);
//! let bytes = encoder.encode(&point).unwrap();
//! assert_eq!(bytes[0], b'C');
//! ```

pub mod cli;
pub mod filter;
pub mod hessian2;
mod options;
pub mod registry;
pub mod shape;
mod type_map;
mod value;

pub use filter::{Filter, FilterContainer, TypeFilter};
pub use hessian2::{EncodeError, Hessian2Encoder};
pub use options::{EncoderOptions, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_RESOURCE_SIZE};
pub use registry::{ClassDef, ObjectId, ReferenceRegistry};
pub use shape::{ListShape, Shape};
pub use type_map::{TypeMap, TypeResolver};
pub use value::{Map, Record, Resource, Shared, Value, DATE_KEY, TYPE_KEY};
