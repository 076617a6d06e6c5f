//! Utility module
//!
//! Bit-string primitives shared by the AIS message encoders and the payload
//! codec. A bit string is a `str` made of `'0'` and `'1'` characters, most
//! significant bit first.

use crate::core::{Error, Result};

/// Character set of the AIS 6-bit text encoding, indexed by code value
pub const SIX_BIT_VOCABULARY: &str =
    "@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^- !\"#$%&'()*+,-./0123456789:;<=>?";

/// Pads a bit string with zeros on the right up to `width` characters
pub fn pad_right(bits: &str, width: usize) -> String {
    let mut padded = String::with_capacity(width.max(bits.len()));
    padded.push_str(bits);
    while padded.len() < width {
        padded.push('0');
    }
    padded
}

/// Pads a bit string with zeros on the left up to `width` characters
pub fn pad_left(bits: &str, width: usize) -> String {
    let mut padded = String::with_capacity(width.max(bits.len()));
    for _ in bits.len()..width {
        padded.push('0');
    }
    padded.push_str(bits);
    padded
}

/// Pads a bit string on the right up to the next multiple of 6
pub fn pad_to_six_bit_boundary(bits: &str) -> String {
    pad_right(bits, bits.len() + (6 - bits.len() % 6) % 6)
}

/// Renders the low `width` bits of `value` in two's complement
pub fn int_to_binary(value: i64, width: usize) -> String {
    let width = width.min(64);
    (0..width)
        .rev()
        .map(|bit| if (value >> bit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Renders a byte as 8 bits
pub fn byte_to_binary(byte: u8) -> String {
    format!("{:08b}", byte)
}

/// Renders a single character in 6-bit AIS text or 8-bit ASCII
///
/// The 6-bit form upper-cases the character first since the vocabulary has
/// no lower case letters.
pub fn char_to_binary(c: char, six_bit: bool) -> Result<String> {
    if six_bit {
        let upper = c.to_ascii_uppercase();
        SIX_BIT_VOCABULARY
            .find(upper)
            .map(|index| int_to_binary(index as i64, 6))
            .ok_or_else(|| Error::encoding(format!("'{}' has no 6-bit representation", c)))
    } else {
        u8::try_from(u32::from(c))
            .map(byte_to_binary)
            .map_err(|_| Error::encoding(format!("'{}' is not an 8-bit character", c)))
    }
}

/// Renders a whole string, character by character
pub fn string_to_binary(text: &str, six_bit: bool) -> Result<String> {
    text.chars().map(|c| char_to_binary(c, six_bit)).collect()
}

/// Turns one 6-bit or 8-bit group into its transmitted character
///
/// 6-bit groups map onto the payload armoring alphabet, 8-bit groups map
/// straight to their byte value. Returns `None` for a malformed group.
pub fn binary_to_char(bits: &str, six_bit: bool) -> Option<char> {
    let width = if six_bit { 6 } else { 8 };
    if bits.len() != width || !is_bit_string(bits) {
        return None;
    }
    let value = u8::from_str_radix(bits, 2).ok()?;
    if six_bit {
        Some(crate::protocol::armor::armor_six_bit(value) as char)
    } else {
        Some(value as char)
    }
}

/// Whether `bits` is a non-empty string of `'0'` and `'1'`
pub fn is_bit_string(bits: &str) -> bool {
    !bits.is_empty() && bits.bytes().all(|b| b == b'0' || b == b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(pad_right("", 0), "");
        assert_eq!(pad_right("", 5), "00000");
        assert_eq!(pad_right("111", 5), "11100");
        assert_eq!(pad_right("11111", 5), "11111");
        assert_eq!(pad_right("11111", 10), "1111100000");
        assert_eq!(pad_left("", 5), "00000");
        assert_eq!(pad_left("111", 5), "00111");
        assert_eq!(pad_left("11111", 10), "0000011111");
        assert_eq!(pad_left("1111111", 3), "1111111");
    }

    #[test]
    fn test_six_bit_boundary() {
        assert_eq!(pad_to_six_bit_boundary("1"), "100000");
        assert_eq!(pad_to_six_bit_boundary("101010"), "101010");
        assert_eq!(pad_to_six_bit_boundary("1010101").len(), 12);
    }

    #[test]
    fn test_int_to_binary() {
        assert_eq!(int_to_binary(0, 8), "00000000");
        assert_eq!(int_to_binary(9, 8), "00001001");
        assert_eq!(int_to_binary(123456789, 30), "000111010110111100110100010101");
        // negative coordinates keep their two's complement within the field
        assert_eq!(int_to_binary(-1, 4), "1111");
        assert_eq!(int_to_binary(-2, 6), "111110");
    }

    #[test]
    fn test_byte_to_binary() {
        assert_eq!(byte_to_binary(0x0), "00000000");
        assert_eq!(byte_to_binary(0xF), "00001111");
        assert_eq!(byte_to_binary(0xFF), "11111111");
    }

    #[test]
    fn test_char_to_binary() {
        assert_eq!(char_to_binary('0', true).unwrap(), "110000");
        assert_eq!(char_to_binary('9', true).unwrap(), "111001");
        assert_eq!(char_to_binary('a', true).unwrap(), "000001");
        assert_eq!(char_to_binary('Z', true).unwrap(), "011010");
        assert_eq!(char_to_binary('0', false).unwrap(), "00110000");
        assert_eq!(char_to_binary('z', false).unwrap(), "01111010");
        assert!(char_to_binary('~', true).is_err());
        assert!(char_to_binary('€', false).is_err());
    }

    #[test]
    fn test_string_to_binary() {
        assert_eq!(string_to_binary("", true).unwrap(), "");
        assert_eq!(
            string_to_binary("Hello World", true).unwrap(),
            "001000 000101 001100 001100 001111 100000 010111 001111 010010 001100 000100".replace(' ', "")
        );
        assert_eq!(
            string_to_binary("Hello World", false).unwrap(),
            "01001000 01100101 01101100 01101100 01101111 00100000 01010111 01101111 01110010 01101100 01100100".replace(' ', "")
        );
    }

    #[test]
    fn test_binary_to_char() {
        assert_eq!(binary_to_char("110000", true), Some('h'));
        assert_eq!(binary_to_char("000001", true), Some('1'));
        assert_eq!(binary_to_char("011010", true), Some('J'));
        assert_eq!(binary_to_char("100111", true), Some('W'));
        assert_eq!(binary_to_char("01000001", false), Some('A'));
        assert_eq!(binary_to_char("01111010", false), Some('z'));
        assert_eq!(binary_to_char("0100", true), None);
        assert_eq!(binary_to_char("01x001", true), None);
    }
}
