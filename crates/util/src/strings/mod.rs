//! String utilities.
//!
//! Provides strict UTF-8 validation and the Hessian text byte encoding.

pub mod utf8;

pub use utf8::{hessian_utf8_len, is_high_surrogate, is_valid_utf8, write_hessian_utf8};
