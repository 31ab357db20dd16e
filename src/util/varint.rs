//! Variable-length integer encoding utilities.
//!
//! Unsigned LEB128: 7 bits per byte, least significant group first, high bit
//! set on every byte except the last. Small values take fewer bytes, which is
//! what makes delta-encoded posting lists compact.

use crate::error::{IndexError, Result};

/// Maximum number of bytes a `u64` can occupy.
pub const MAX_VARINT_LEN_U64: usize = 10;

/// Append the varint encoding of `value` to `buf`, returning the number of
/// bytes written.
pub fn encode_u64_into(value: u64, buf: &mut Vec<u8>) -> usize {
    let mut val = value;
    let mut written = 0;

    loop {
        let mut byte = (val & 0x7F) as u8;
        val >>= 7;

        if val != 0 {
            byte |= 0x80; // Set continuation bit
        }

        buf.push(byte);
        written += 1;

        if val == 0 {
            return written;
        }
    }
}

/// Encode a u64 value using variable-length encoding.
pub fn encode_u64(value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT_LEN_U64);
    encode_u64_into(value, &mut bytes);
    bytes
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode a u64 value from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. A sequence that ends
/// while the continuation bit is still set, or that does not fit in 64 bits,
/// is reported as [`IndexError::CorruptFormat`].
pub fn decode_u64(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in bytes.iter().enumerate() {
        // The tenth byte may only carry the single remaining bit.
        if shift == 63 && byte > 1 {
            return Err(IndexError::corrupt("varint overflows u64"));
        }

        result |= ((byte & 0x7F) as u64) << shift;

        if (byte & 0x80) == 0 {
            return Ok((result, i + 1));
        }

        shift += 7;
    }

    Err(IndexError::corrupt(format!(
        "incomplete varint after {} bytes",
        bytes.len()
    )))
}
