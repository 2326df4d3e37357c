//! Hessian 2 encoder error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for Hessian 2 encoding operations.
///
/// Every error is fatal to the value being encoded; the bytes written for it
/// are discarded but the session's reference numbering is not rolled back.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),
    #[error("input is not well-formed UTF-8 or contains codepoints outside the Unicode range")]
    InvalidEncoding,
    #[error("byte sink rejected write: {0}")]
    SinkFault(#[source] io::Error),
    #[error("cannot read resource {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("length {0} does not fit the wire format")]
    LengthOverflow(usize),
    #[error("filter failed: {0}")]
    Filter(String),
}
