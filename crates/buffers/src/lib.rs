//! hessian-buffers - byte sink for the Hessian encoder.
//!
//! The encoder writes every tag and payload into a [`Writer`], an auto-growing
//! buffer that always emits multi-byte integers in network (big-endian) order.

mod writer;

pub use writer::Writer;
