//! Base-128 varints and zig-zag mapping.
//!
//! Each byte carries 7 payload bits, least significant group first; the high bit is set on every
//! byte except the last. A `u64` needs at most [`MAX_VARINT_LEN`] bytes.

use crate::codec::CodecError;

/// Longest legal encoding of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Append `value` to `out` as a varint.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Number of bytes [`encode_varint`] writes for `value`.
pub fn encoded_len(value: u64) -> usize {
    // 1 byte per started 7-bit group; `| 1` keeps zero at one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decode one varint from `data[*pos..end]`, advancing `pos` past it.
///
/// Fails with [`CodecError::Truncated`] when `end` is reached while a continuation bit is still
/// set, and with [`CodecError::VarintOverflow`] when the encoding runs past ten bytes or carries
/// bits above the 64th.
pub fn decode_varint(data: &[u8], pos: &mut usize, end: usize) -> Result<u64, CodecError> {
    let mut result = 0u64;
    let mut p = *pos;
    for i in 0..MAX_VARINT_LEN {
        if p >= end {
            return Err(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = data[p];
        p += 1;
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            // The tenth byte may only contribute bit 63.
            return Err(CodecError::VarintOverflow);
        }
        result |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            *pos = p;
            return Ok(result);
        }
    }
    Err(CodecError::VarintOverflow)
}

/// Advance `pos` past one varint without assembling its value.
///
/// Accepts exactly the encodings [`decode_varint`] accepts.
pub fn skip_varint(data: &[u8], pos: &mut usize, end: usize) -> Result<(), CodecError> {
    let mut p = *pos;
    for i in 0..MAX_VARINT_LEN {
        if p >= end {
            return Err(CodecError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = data[p];
        p += 1;
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(CodecError::VarintOverflow);
        }
        if byte < 0x80 {
            *pos = p;
            return Ok(());
        }
    }
    Err(CodecError::VarintOverflow)
}

#[inline]
pub fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub fn zigzag_decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[inline]
pub fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub fn zigzag_decode64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}
