// SPDX-License-Identifier: MIT

//! Bit-field access into raw reports.
//!
//! HID reports are little-endian and fields are packed least significant
//! bit first: bit 0 of a report is bit 0 of byte 0, bit 8 is bit 0 of
//! byte 1, and a field that straddles a byte boundary continues with the
//! low bits of the next byte.

use crate::decode::ReportError;
use crate::ensure;

/// Extract `width` bits starting at absolute bit `bit_offset` of `buf`.
///
/// ```
/// # use hidtree::extract_bits;
/// // a 12-bit field at bit 4
/// assert_eq!(extract_bits(&[0x30, 0x12], 4, 12), Ok(0x123));
/// ```
pub fn extract_bits(buf: &[u8], bit_offset: u32, width: u32) -> Result<u32, ReportError> {
    ensure!((1..=32).contains(&width), ReportError::InvalidWidth { width });
    let end = u64::from(bit_offset) + u64::from(width);
    ensure!(
        end <= buf.len() as u64 * 8,
        ReportError::OutOfBounds {
            bit_offset,
            width,
            len: buf.len()
        }
    );

    let first = (bit_offset / 8) as usize;
    let last = ((end - 1) / 8) as usize;
    // At most 5 bytes: 32 bits plus up to 7 bits of leading offset
    let value = buf[first..=last]
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | (u64::from(*b) << (8 * i)));
    let value = (value >> (bit_offset % 8)) & (u64::MAX >> (64 - width));
    Ok(value as u32)
}

/// Reinterpret the low `width` bits of `value` as a two's complement number.
///
/// ```
/// # use hidtree::sign_extend;
/// assert_eq!(sign_extend(0xff, 8), -1);
/// assert_eq!(sign_extend(0x7f, 8), 127);
/// assert_eq!(sign_extend(0x800, 12), -2048);
/// ```
pub fn sign_extend(value: u32, width: u32) -> i32 {
    match width {
        0 => 0,
        32.. => value as i32,
        width => {
            let shift = 32 - width;
            ((value << shift) as i32) >> shift
        }
    }
}

/// Shortcut for [extract_bits] followed by [sign_extend].
pub fn extract_signed(buf: &[u8], bit_offset: u32, width: u32) -> Result<i32, ReportError> {
    extract_bits(buf, bit_offset, width).map(|v| sign_extend(v, width))
}
