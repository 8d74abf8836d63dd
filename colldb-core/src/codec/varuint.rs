//! Base-128 variable-length unsigned integers (ULEB128).
//!
//! Each byte carries seven payload bits, least-significant group first. The
//! high bit is set on every byte except the last.

use crate::error::{CollectionError, CollectionResult};

use super::format::{MAX_VARUINT_BITS, VARUINT_CONTINUATION, VARUINT_PAYLOAD_MASK};

/// Appends the varuint encoding of `value` to `buf`.
pub fn encode_varuint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        // Truncation to the low seven bits is the point of the mask.
        #[allow(clippy::cast_possible_truncation)]
        let mut byte = (value & u64::from(VARUINT_PAYLOAD_MASK)) as u8;
        value >>= 7;
        if value != 0 {
            byte |= VARUINT_CONTINUATION;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Number of bytes [`encode_varuint`] emits for `value`.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    let significant = u64::BITS - value.leading_zeros();
    if significant == 0 {
        1
    } else {
        significant.div_ceil(7) as usize
    }
}

/// Decodes a varuint, pulling one byte at a time from `next_byte`.
///
/// # Errors
///
/// Propagates any error from `next_byte` and returns
/// [`CollectionError::VaruintOverflow`] once the value would need more than
/// 64 bits.
pub fn decode_with<F>(mut next_byte: F) -> CollectionResult<u64>
where
    F: FnMut() -> CollectionResult<u8>,
{
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        if shift >= MAX_VARUINT_BITS {
            return Err(CollectionError::overflow(format!(
                "varuint longer than {MAX_VARUINT_BITS} bits"
            )));
        }
        let byte = next_byte()?;
        let payload = u64::from(byte & VARUINT_PAYLOAD_MASK);
        // Only the lowest payload bit still fits in the final group.
        if shift == MAX_VARUINT_BITS - 1 && payload > 1 {
            return Err(CollectionError::overflow("varuint exceeds u64::MAX"));
        }
        result |= payload << shift;
        if byte & VARUINT_CONTINUATION == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

/// Decodes a varuint from `buf` starting at `*pos`, advancing `*pos` past it.
///
/// # Errors
///
/// Returns [`CollectionError::UnexpectedEndOfStream`] if `buf` ends before the
/// final byte and [`CollectionError::VaruintOverflow`] for values wider than
/// 64 bits.
pub fn decode_varuint(buf: &[u8], pos: &mut usize) -> CollectionResult<u64> {
    decode_with(|| {
        let byte = *buf
            .get(*pos)
            .ok_or_else(|| CollectionError::eof(format!("varuint at offset {pos}")))?;
        *pos += 1;
        Ok(byte)
    })
}
