//! hessian-util - numeric and text primitives for the Hessian encoder.
//!
//! - [`endian`]: host byte order and big-endian float/short serialization.
//! - [`strings::utf8`]: strict UTF-8 validation and the legacy Hessian
//!   UTF-8-over-UTF-16 re-encoding.

pub mod endian;
pub mod strings;

// Re-exports for convenience
pub use endian::{double_bytes, float_bytes, is_little_endian, short_bytes, LITTLE_ENDIAN};
pub use strings::utf8::{hessian_utf8_len, is_high_surrogate, is_valid_utf8, write_hessian_utf8};
