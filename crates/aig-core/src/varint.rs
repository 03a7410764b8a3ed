//! Biere-scheme variable-length integer codec used by binary AIGER (§4.B).
//!
//! Each byte contributes 7 payload bits, little-endian group order, with the
//! high bit of a byte set iff another byte follows. Unlike most varint
//! schemes, the terminating byte contributes its *full* 8 bits at its
//! positional weight — dropping its high bit here would silently truncate
//! values and break compatibility with the reference AIGER encoder.

use crate::cursor::Cursor;
use crate::error::{CoreError, CoreResult};

/// Decodes one varint from `cursor`, advancing it past the terminating byte.
pub fn decode_varint(cursor: &mut Cursor<'_>) -> CoreResult<u32> {
    let start = cursor.offset();
    let mut result: u32 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = cursor.read_u8().map_err(|_| CoreError::TruncatedVarint { at: start })?;
        if byte & 0x80 == 0 {
            result += u32::from(byte) << shift;
            return Ok(result);
        }
        result += u32::from(byte & 0x7F) << shift;
        shift += 7;
    }
}

/// Encodes `value` into the same scheme. Exists to drive the round-trip
/// property test (`decode(encode(u)) == u`); there is no AIGER-writing API
/// built on top of it.
pub fn encode_varint(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let low = (value & 0x7F) as u8;
        let rest = value >> 7;
        if rest == 0 {
            // Terminating byte: its high bit must be clear, and it carries
            // its full 8 bits at this position, so no masking beyond `low`.
            out.push(low);
            return out;
        }
        out.push(low | 0x80);
        value = rest;
        // `rest` already dropped the 7 bits we consumed; loop continues
        // until the remaining value fits the final full-byte slot.
    }
}

/// Decodes `n` signed literal deltas (§4.B): the first value is a plain
/// varint, each subsequent varint `d` is a zigzag-style delta against the
/// previous decoded literal (`d >> 1` magnitude, `d & 1` sign: clear = +).
pub fn decode_delta_literals(cursor: &mut Cursor<'_>, n: usize) -> CoreResult<Vec<u32>> {
    let mut out = Vec::with_capacity(n);
    let mut prev: i64 = 0;
    for i in 0..n {
        let d = decode_varint(cursor)?;
        let literal = if i == 0 {
            i64::from(d)
        } else {
            let magnitude = i64::from(d >> 1);
            let delta = if d & 1 == 0 { magnitude } else { -magnitude };
            prev + delta
        };
        prev = literal;
        out.push(literal as u32);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn decode_all(bytes: &[u8]) -> u32 {
        let mut c = Cursor::new(bytes);
        decode_varint(&mut c).unwrap()
    }

    #[test]
    fn scenario_s1() {
        assert_eq!(decode_all(&[0x00]), 0);
        assert_eq!(decode_all(&[0x7F]), 127);
        assert_eq!(decode_all(&[0x80, 0x01]), 128);
        assert_eq!(decode_all(&[0xE5, 0x8E, 0x26]), 624_485);
    }

    #[test]
    fn truncated_varint_errors() {
        let mut c = Cursor::new(&[0x80]);
        assert!(matches!(decode_varint(&mut c), Err(CoreError::TruncatedVarint { .. })));
    }

    #[test]
    fn cursor_advances_past_terminator() {
        let mut c = Cursor::new(&[0x80, 0x01, 0xAA]);
        let v = decode_varint(&mut c).unwrap();
        assert_eq!(v, 128);
        assert_eq!(c.offset(), 2);
    }

    #[test]
    fn delta_literals_zigzag() {
        let mut buf = Vec::new();
        buf.extend(encode_varint(10)); // first literal: 10
        buf.extend(encode_varint(3 << 1)); // +3 -> 13
        buf.extend(encode_varint((2 << 1) | 1)); // -2 -> 11
        let mut c = Cursor::new(&buf);
        let lits = decode_delta_literals(&mut c, 3).unwrap();
        assert_eq!(lits, vec![10, 13, 11]);
    }

    proptest! {
        #[test]
        fn roundtrip(u in 0u32..=u32::MAX) {
            let encoded = encode_varint(u);
            let mut c = Cursor::new(&encoded);
            let decoded = decode_varint(&mut c).unwrap();
            prop_assert_eq!(decoded, u);
            prop_assert_eq!(c.remaining(), 0);
        }
    }
}
