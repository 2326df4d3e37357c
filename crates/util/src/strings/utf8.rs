//! Strict UTF-8 validation and Hessian's UTF-16-based text bytes.
//!
//! Hessian text is measured and chunked in UTF-16 code units, and every unit
//! (including each half of a surrogate pair) is written on its own in one to
//! three bytes. This is the "modified UTF-8" Java peers produce and expect; a
//! supplementary character therefore takes six bytes instead of four.

use hessian_buffers::Writer;

/// Lead octet of a multi-octet sequence: the payload bits it carries and the
/// total length of the sequence it opens.
fn lead_octet(byte: u8) -> Option<(u32, u32)> {
    let b = u32::from(byte);
    if byte & 0x80 == 0 {
        Some((b, 1))
    } else if byte & 0xe0 == 0xc0 {
        Some(((b & 0x1f) << 6, 2))
    } else if byte & 0xf0 == 0xe0 {
        Some(((b & 0x0f) << 12, 3))
    } else if byte & 0xf8 == 0xf0 {
        Some(((b & 0x07) << 18, 4))
    } else if byte & 0xfc == 0xf8 {
        // Five and six octet forms are never valid, but they are consumed to
        // the end so the final code point check rejects them.
        Some(((b & 0x03) << 24, 5))
    } else if byte & 0xfe == 0xfc {
        Some(((b & 0x01) << 30, 6))
    } else {
        None
    }
}

fn is_illegal_code_point(code_point: u32, octets: u32) -> bool {
    let overlong = (octets == 2 && code_point < 0x80)
        || (octets == 3 && code_point < 0x800)
        || (octets == 4 && code_point < 0x10000)
        || octets > 4;
    let surrogate = code_point & 0xffff_f800 == 0xd800;
    overlong || surrogate || code_point > 0x10_ffff
}

/// Checks that `bytes` is well-formed UTF-8 whose code points are all Unicode
/// scalar values.
///
/// Rejects non-shortest forms, encoded surrogates (U+D800..U+DFFF), code
/// points above U+10FFFF, stray continuation bytes and sequences cut off by
/// the end of input.
///
/// # Examples
///
/// ```
/// use hessian_util::is_valid_utf8;
///
/// assert!(is_valid_utf8("héllo 😀".as_bytes()));
/// assert!(!is_valid_utf8(&[0xc1, 0x81])); // overlong 'A'
/// assert!(!is_valid_utf8(&[0xed, 0xa0, 0x80])); // U+D800
/// ```
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    // Continuation octets still expected in the current sequence.
    let mut state = 0u32;
    let mut code_point = 0u32;
    let mut octets = 1u32;

    for &byte in bytes {
        if state == 0 {
            match lead_octet(byte) {
                Some((payload, 1)) => {
                    code_point = payload;
                    octets = 1;
                }
                Some((payload, len)) => {
                    code_point = payload;
                    octets = len;
                    state = len - 1;
                }
                None => return false,
            }
        } else {
            if byte & 0xc0 != 0x80 {
                return false;
            }
            let shift = (state - 1) * 6;
            code_point |= (u32::from(byte) & 0x3f) << shift;
            state -= 1;
            if state == 0 {
                if is_illegal_code_point(code_point, octets) {
                    return false;
                }
                code_point = 0;
                octets = 1;
            }
        }
    }

    state == 0
}

/// Whether `unit` is the leading (high) half of a UTF-16 surrogate pair.
#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xd800..=0xdbff).contains(&unit)
}

/// Number of bytes [`write_hessian_utf8`] produces for `units`.
pub fn hessian_utf8_len(units: &[u16]) -> usize {
    units
        .iter()
        .map(|&unit| match unit {
            0..=0x7f => 1,
            0x80..=0x7ff => 2,
            _ => 3,
        })
        .sum()
}

/// Writes UTF-16 code units as Hessian text bytes. Returns the number of
/// bytes written.
///
/// # Examples
///
/// ```
/// use hessian_buffers::Writer;
/// use hessian_util::write_hessian_utf8;
///
/// let units: Vec<u16> = "a😀".encode_utf16().collect();
/// let mut writer = Writer::new();
/// assert_eq!(write_hessian_utf8(&mut writer, &units), 7);
/// assert_eq!(
///     writer.flush(),
///     [b'a', 0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80]
/// );
/// ```
pub fn write_hessian_utf8(writer: &mut Writer, units: &[u16]) -> usize {
    writer.ensure_capacity(units.len() * 3);
    let start = writer.x;
    for &unit in units {
        let ch = u32::from(unit);
        if ch < 0x80 {
            writer.uint8[writer.x] = ch as u8;
            writer.x += 1;
        } else if ch < 0x800 {
            writer.uint8[writer.x] = (0xc0 + ((ch >> 6) & 0x1f)) as u8;
            writer.uint8[writer.x + 1] = (0x80 + (ch & 0x3f)) as u8;
            writer.x += 2;
        } else {
            writer.uint8[writer.x] = (0xe0 + ((ch >> 12) & 0x0f)) as u8;
            writer.uint8[writer.x + 1] = (0x80 + ((ch >> 6) & 0x3f)) as u8;
            writer.uint8[writer.x + 2] = (0x80 + (ch & 0x3f)) as u8;
            writer.x += 3;
        }
    }
    writer.x - start
}
