//! Binary payload codec
//!
//! Packs a logical bit string into the bytes carried in a sentence payload
//! field, either as 6-bit armored printable characters or as raw 8-bit
//! bytes, and accounts for the fill bits announced alongside the payload.

use crate::util::is_bit_string;

/// Printable character for every 6-bit value, in value order
pub const ARMOR_TABLE: &[u8; 64] =
    b"0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVW`abcdefghijklmnopqrstuvw";

/// Maps a 6-bit value onto its armored character
///
/// Values 0-39 land on `'0'..='W'`, values 40-63 on `` '`'..='w' ``. Only the
/// low six bits of `value` are used.
pub fn armor_six_bit(value: u8) -> u8 {
    ARMOR_TABLE[usize::from(value & 0x3F)]
}

/// Maps an armored character back onto its 6-bit value
pub fn dearmor_six_bit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'W' => Some(c - 48),
        b'`'..=b'w' => Some(c - 56),
        _ => None,
    }
}

/// Packs a bit string into payload bytes
///
/// With `six_bit` set every group of 6 bits becomes one armored character,
/// otherwise every group of 8 bits becomes one raw byte. A malformed bit
/// string yields an empty payload: one that is empty, holds anything other
/// than `'0'` and `'1'`, or whose length is not a multiple of the group width.
pub fn encode_bit_string(bits: &str, six_bit: bool) -> Vec<u8> {
    let width = if six_bit { 6 } else { 8 };
    if !is_bit_string(bits) || bits.len() % width != 0 {
        return Vec::new();
    }

    bits.as_bytes()
        .chunks_exact(width)
        .map(|group| {
            let value = group.iter().fold(0u8, |acc, b| (acc << 1) | (b - b'0'));
            if six_bit { armor_six_bit(value) } else { value }
        })
        .collect()
}

/// Number of fill bits announced for a payload of `payload_len` bytes
///
/// The bit length is taken as the payload byte count times 8, which is what
/// VDES-1000 transceivers expect in the fill-bits field.
pub fn fill_bits(payload_len: usize) -> u8 {
    // (6 - (8L mod 6)) mod 6, reduced on L mod 3 so large payloads cannot overflow
    let bit_remainder = ((payload_len % 3) * 8) % 6;
    ((6 - bit_remainder) % 6) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_table() {
        assert_eq!(armor_six_bit(0), b'0');
        assert_eq!(armor_six_bit(9), b'9');
        assert_eq!(armor_six_bit(10), b':');
        assert_eq!(armor_six_bit(39), b'W');
        assert_eq!(armor_six_bit(40), b'`');
        assert_eq!(armor_six_bit(63), b'w');
        for value in 0..64u8 {
            let c = armor_six_bit(value);
            let expected = if value < 40 { value + 48 } else { value + 56 };
            assert_eq!(c, expected);
            assert_eq!(dearmor_six_bit(c), Some(value));
        }
        assert_eq!(dearmor_six_bit(b'X'), None);
        assert_eq!(dearmor_six_bit(b'x'), None);
    }

    #[test]
    fn test_encode_six_bit() {
        assert!(encode_bit_string("", true).is_empty());
        assert!(encode_bit_string("ThisIsNotValid", true).is_empty());
        assert_eq!(encode_bit_string("000000", true), b"0");
        assert_eq!(encode_bit_string("001010", true), b":");
        assert_eq!(encode_bit_string("111111001011000001", true), b"w;1");
        assert_eq!(encode_bit_string("100001111111001011000001", true), b"Qw;1");
    }

    #[test]
    fn test_partial_group_is_malformed() {
        assert!(encode_bit_string("0101010000011", true).is_empty());
        assert!(encode_bit_string("00000", true).is_empty());
        assert!(encode_bit_string("0101010000011101001", false).is_empty());
        assert!(encode_bit_string("000000", false).is_empty());
        assert_eq!(encode_bit_string("010101000001", true), b"E1");
    }

    #[test]
    fn test_encode_eight_bit() {
        assert!(encode_bit_string("", false).is_empty());
        assert_eq!(encode_bit_string("00001010", false), vec![0x0A]);
        assert_eq!(encode_bit_string("111111110000101100000001", false), vec![0xFF, 0x0B, 0x01]);
        assert_eq!(encode_bit_string("010101000001110100100000", false), vec![0x54, 0x1D, 0x20]);
    }

    #[test]
    fn test_fill_bits() {
        assert_eq!(fill_bits(0), 0);
        assert_eq!(fill_bits(1), 4);
        assert_eq!(fill_bits(2), 2);
        assert_eq!(fill_bits(3), 0);
        assert_eq!(fill_bits(5), 2);
        assert_eq!(fill_bits(60), 0);
        for len in 0..500usize {
            let expected = ((6 - (8 * len) % 6) % 6) as u8;
            assert_eq!(fill_bits(len), expected);
            assert!(fill_bits(len) <= 5);
        }
    }
}
