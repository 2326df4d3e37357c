//! Host byte order and big-endian numeric serialization.
//!
//! Hessian puts every multi-byte number on the wire in network order. The
//! helpers here build the raw native-order bytes and reverse them on
//! little-endian hosts, so callers never depend on the platform layout.

/// Whether the target platform stores integers least-significant byte first.
/// Resolved at compile time.
pub const LITTLE_ENDIAN: bool = cfg!(target_endian = "little");

/// Detects the host byte order by comparing a native-order and a big-endian
/// representation of the same integer.
///
/// # Examples
///
/// ```
/// use hessian_util::endian::{is_little_endian, LITTLE_ENDIAN};
///
/// assert_eq!(is_little_endian(), LITTLE_ENDIAN);
/// ```
#[inline]
pub fn is_little_endian() -> bool {
    1u32.to_ne_bytes()[0] != 1u32.to_be_bytes()[0]
}

#[inline]
fn to_network<const N: usize>(mut bytes: [u8; N]) -> [u8; N] {
    if is_little_endian() {
        bytes.reverse();
    }
    bytes
}

/// Serializes a 64-bit IEEE-754 double in big-endian order.
///
/// # Examples
///
/// ```
/// use hessian_util::endian::double_bytes;
///
/// assert_eq!(double_bytes(1.0), [0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
/// ```
#[inline]
pub fn double_bytes(value: f64) -> [u8; 8] {
    to_network(value.to_ne_bytes())
}

/// Serializes a 32-bit IEEE-754 float in big-endian order.
#[inline]
pub fn float_bytes(value: f32) -> [u8; 4] {
    to_network(value.to_ne_bytes())
}

/// Serializes a signed 16-bit integer in big-endian order.
#[inline]
pub fn short_bytes(value: i16) -> [u8; 2] {
    to_network(value.to_ne_bytes())
}
