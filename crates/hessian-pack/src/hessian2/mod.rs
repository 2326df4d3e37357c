//! Hessian 2.0 serialization writer.
//!
//! Wire grammar: <http://hessian.caucho.com/doc/hessian-serialization.html>

pub mod constants;
mod encoder;
pub mod error;

pub use encoder::Hessian2Encoder;
pub use error::EncodeError;
