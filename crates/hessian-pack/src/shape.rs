//! List-or-map classification of untyped key/value containers.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// How an untyped map is tested for being a list in disguise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListShape {
    /// The integer keys sum to `0 + 1 + ... + (n - 1)`. O(n) and matches the
    /// legacy writers byte for byte, but key sets such as `{0, 0, 3}` pass too.
    #[default]
    KeySum,
    /// The keys are exactly `0, 1, ..., n - 1` in order.
    Exact,
}

/// Wire shape chosen for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    List,
    Map,
}

/// Classifies a container. Any non-integer key makes it a map.
///
/// # Examples
///
/// ```
/// use hessian_pack::shape::{classify, ListShape, Shape};
/// use hessian_pack::Value;
///
/// let keys = |ks: &[i32]| ks.iter().map(|k| (Value::Int(*k), Value::Null)).collect::<Vec<_>>();
/// assert_eq!(classify(&keys(&[0, 1, 2]), ListShape::KeySum), Shape::List);
/// assert_eq!(classify(&keys(&[0, 2]), ListShape::KeySum), Shape::Map);
/// ```
pub fn classify(entries: &[(Value, Value)], strategy: ListShape) -> Shape {
    let is_list = match strategy {
        ListShape::KeySum => is_list_key_sum(entries),
        ListShape::Exact => is_list_exact(entries),
    };
    if is_list {
        Shape::List
    } else {
        Shape::Map
    }
}

fn is_list_key_sum(entries: &[(Value, Value)]) -> bool {
    let n = entries.len() as i128;
    let expected = n * (n - 1) / 2;
    let mut sum: i128 = 0;
    for (key, _) in entries {
        match key {
            Value::Int(k) => sum += i128::from(*k),
            _ => return false,
        }
    }
    sum == expected
}

fn is_list_exact(entries: &[(Value, Value)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, Value::Int(k) if i64::from(*k) == i as i64))
}
