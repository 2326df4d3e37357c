//! Hessian 2 wire tags.

pub const NULL: u8 = b'N';
pub const TRUE: u8 = b'T';
pub const FALSE: u8 = b'F';

pub const INT: u8 = b'I';
/// Single-byte int: `value + 0x90` for `-16..=47`.
pub const INT_ZERO: u8 = 0x90;
pub const INT_BYTE_MIN: i32 = -0x10;
pub const INT_BYTE_MAX: i32 = 0x2f;
/// Two-byte int: `0xc8 + (value >> 8)`, then the low byte.
pub const INT_BYTE_ZERO: i32 = 0xc8;
pub const INT_SHORT_MIN: i32 = -0x800;
pub const INT_SHORT_MAX: i32 = 0x7ff;
/// Three-byte int: `0xd4 + (value >> 16)`, then two bytes.
pub const INT_SHORT_ZERO: i32 = 0xd4;
pub const INT_TRIPLE_MIN: i32 = -0x40000;
pub const INT_TRIPLE_MAX: i32 = 0x3ffff;

pub const DOUBLE: u8 = b'D';
pub const DOUBLE_ZERO: u8 = 0x5b;
pub const DOUBLE_ONE: u8 = 0x5c;
pub const DOUBLE_BYTE: u8 = 0x5d;
pub const DOUBLE_SHORT: u8 = 0x5e;
/// Double stored as a 32-bit count of thousandths.
pub const DOUBLE_MILL: u8 = 0x5f;

pub const DATE_MILLIS: u8 = 0x4a;
pub const DATE_MINUTES: u8 = 0x4b;
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Final chunk of a string of 1024 code units or more.
pub const STRING_FINAL: u8 = b'S';
/// Non-final string chunk.
pub const STRING_CHUNK: u8 = b'R';
/// Two-byte string length: `0x30 + (len >> 8)`, then the low byte.
pub const STRING_SHORT: u8 = 0x30;
pub const STRING_DIRECT_MAX: usize = 0x1f;
pub const STRING_SHORT_MAX: usize = 0x3ff;
/// Code units per non-final string chunk.
pub const STRING_CHUNK_UNITS: usize = 0x8000;

pub const BINARY_FINAL: u8 = b'B';
pub const BINARY_CHUNK: u8 = b'A';
/// One-byte binary length: `0x20 + len`.
pub const BINARY_DIRECT: u8 = 0x20;
/// Two-byte binary length: `0x34 + (len >> 8)`, then the low byte.
pub const BINARY_SHORT: u8 = 0x34;
pub const BINARY_DIRECT_MAX: usize = 0x0f;
pub const BINARY_SHORT_MAX: usize = 0x3ff;
/// Bytes per non-final binary chunk.
pub const BINARY_CHUNK_SIZE: usize = 0xffff;

/// Fixed-length list with an explicit int length.
pub const LIST_FIXED: u8 = 0x58;
/// Fixed-length list, `0x78 + len` for lengths up to 7.
pub const LIST_DIRECT: u8 = 0x78;
pub const LIST_DIRECT_MAX: usize = 7;

pub const MAP_TYPED: u8 = b'M';
pub const MAP_UNTYPED: u8 = b'H';
pub const END: u8 = b'Z';

pub const CLASS_DEF: u8 = b'C';
/// Instance with an explicit int class index.
pub const OBJECT: u8 = b'O';
/// Instance whose class index is folded into the tag, `0x60 + index`.
pub const OBJECT_DIRECT: u8 = 0x60;
pub const OBJECT_DIRECT_MAX: u32 = 0x0f;

pub const REF: u8 = 0x51;
