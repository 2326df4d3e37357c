//! Encoder configuration.

use serde::{Deserialize, Serialize};

use crate::shape::ListShape;
use crate::type_map::TypeMap;

/// Files larger than this are refused as resources (64 MiB).
pub const DEFAULT_MAX_RESOURCE_SIZE: u64 = 0x400_0000;

/// Initial allocation of the encoder's output buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Options controlling a [`Hessian2Encoder`](crate::hessian2::Hessian2Encoder).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use hessian_pack::{EncoderOptions, ListShape};
///
/// let options = EncoderOptions::from_json_str(r#"{"list-shape": "exact"}"#).unwrap();
/// assert_eq!(options.list_shape, ListShape::Exact);
/// assert_eq!(options.max_resource_size, 64 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EncoderOptions {
    pub list_shape: ListShape,
    pub max_resource_size: u64,
    pub buffer_size: usize,
    /// Local to wire type names, applied to record class definitions.
    pub type_map: TypeMap,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            list_shape: ListShape::KeySum,
            max_resource_size: DEFAULT_MAX_RESOURCE_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            type_map: TypeMap::new(),
        }
    }
}

impl EncoderOptions {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
