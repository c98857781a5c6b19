// This file is part of Mnemos.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fixed-width big-endian arithmetic for checksummed entropy.
//!
//! Checksummed entropy never exceeds 264 bits (256 bits of entropy plus an
//! 8-bit checksum), so a 33-byte buffer holds every value the codec handles.
//! The buffer is read as one unsigned integer, most significant byte first.

use crate::error::{Error, Result};
use crate::length::BITS_PER_WORD;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const WIDTH: usize = 33;

const WORD_MASK: u16 = (1 << BITS_PER_WORD) - 1;

#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WideUint {
    bytes: [u8; WIDTH],
}

impl WideUint {
    pub const fn zero() -> Self {
        Self { bytes: [0u8; WIDTH] }
    }

    /// Reads `bytes` as a big-endian integer, right-aligned in the buffer.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > WIDTH {
            return Err(Error::InvalidEntropyLength(bytes.len() * 8));
        }
        let mut value = Self::zero();
        value.bytes[WIDTH - bytes.len()..].copy_from_slice(bytes);
        Ok(value)
    }

    /// Left-pads (or truncates from the top) to exactly `len` bytes.
    pub fn to_be_bytes(&self, len: usize) -> Zeroizing<Vec<u8>> {
        let len = len.min(WIDTH);
        Zeroizing::new(self.bytes[WIDTH - len..].to_vec())
    }

    pub fn shl(&mut self, n: usize) {
        let byte_shift = n / 8;
        let bit_shift = n % 8;

        for i in 0..WIDTH {
            let src = i + byte_shift;
            let hi = if src < WIDTH {
                self.bytes[src] << bit_shift
            } else {
                0
            };
            let lo = if bit_shift > 0 && src + 1 < WIDTH {
                self.bytes[src + 1] >> (8 - bit_shift)
            } else {
                0
            };
            self.bytes[i] = hi | lo;
        }
    }

    pub fn shr(&mut self, n: usize) {
        let byte_shift = n / 8;
        let bit_shift = n % 8;

        for i in (0..WIDTH).rev() {
            self.bytes[i] = match i.checked_sub(byte_shift) {
                Some(src) => {
                    let lo = self.bytes[src] >> bit_shift;
                    let hi = if bit_shift > 0 && src > 0 {
                        self.bytes[src - 1] << (8 - bit_shift)
                    } else {
                        0
                    };
                    hi | lo
                }
                None => 0,
            };
        }
    }

    /// ORs `value` into the two least significant bytes.
    pub fn or_low(&mut self, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.bytes[WIDTH - 1] |= lo;
        self.bytes[WIDTH - 2] |= hi;
    }

    /// The lowest `n` bits, `n <= 16`.
    pub fn low_bits(&self, n: usize) -> u16 {
        let low = u16::from_be_bytes([self.bytes[WIDTH - 2], self.bytes[WIDTH - 1]]);
        match n {
            0 => 0,
            n if n >= 16 => low,
            n => low & ((1u16 << n) - 1),
        }
    }
}

impl fmt::Debug for WideUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WideUint(..)")
    }
}

/// Splits the lowest `count * 11` bits of `value` into word indices, most
/// significant group first.
///
/// Groups are taken from the low end and written from the last slot
/// backwards, so no reversal is needed.
pub fn split_words(value: &WideUint, count: usize) -> Zeroizing<Vec<u16>> {
    let mut remaining = value.clone();
    let mut indices = Zeroizing::new(vec![0u16; count]);

    for slot in indices.iter_mut().rev() {
        *slot = remaining.low_bits(BITS_PER_WORD);
        remaining.shr(BITS_PER_WORD);
    }

    indices
}

/// Inverse of [`split_words`]: `value = value * 2048 + index` for each index in order.
pub fn join_words(indices: &[u16]) -> WideUint {
    let mut value = WideUint::zero();
    for &index in indices {
        value.shl(BITS_PER_WORD);
        value.or_low(index & WORD_MASK);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_hex(s: &str) -> WideUint {
        WideUint::from_be_bytes(&hex::decode(s).unwrap()).unwrap()
    }

    #[test]
    fn test_from_be_bytes_right_aligns() {
        let value = WideUint::from_be_bytes(&[0x01, 0x02]).unwrap();
        assert_eq!(value.to_be_bytes(3).as_slice(), &[0x00, 0x01, 0x02]);
        assert_eq!(value.low_bits(16), 0x0102);
    }

    #[test]
    fn test_from_be_bytes_rejects_oversized() {
        assert_eq!(
            WideUint::from_be_bytes(&[0u8; 34]),
            Err(Error::InvalidEntropyLength(272))
        );
        assert!(WideUint::from_be_bytes(&[0xffu8; WIDTH]).is_ok());
    }

    #[test]
    fn test_shl_crosses_byte_boundaries() {
        let mut value = WideUint::from_be_bytes(&[0x81]).unwrap();
        value.shl(1);
        assert_eq!(value.to_be_bytes(2).as_slice(), &[0x01, 0x02]);

        let mut value = WideUint::from_be_bytes(&[0x07, 0xff]).unwrap();
        value.shl(11);
        assert_eq!(value.to_be_bytes(4).as_slice(), &[0x00, 0x3f, 0xf8, 0x00]);
    }

    #[test]
    fn test_shl_discards_overflow() {
        let mut value = from_hex(&"ff".repeat(WIDTH));
        value.shl(8);
        let mut expected = vec![0xffu8; WIDTH];
        expected[WIDTH - 1] = 0;
        assert_eq!(value.to_be_bytes(WIDTH).as_slice(), expected.as_slice());
    }

    #[test]
    fn test_shr_crosses_byte_boundaries() {
        let mut value = WideUint::from_be_bytes(&[0x3f, 0xf8, 0x00]).unwrap();
        value.shr(11);
        assert_eq!(value.low_bits(16), 0x07ff);

        let mut value = WideUint::from_be_bytes(&[0x01, 0x00]).unwrap();
        value.shr(1);
        assert_eq!(value.low_bits(16), 0x0080);
    }

    #[test]
    fn test_shift_by_whole_width_clears() {
        let mut left = from_hex(&"a5".repeat(WIDTH));
        left.shl(WIDTH * 8);
        assert_eq!(left, WideUint::zero());

        let mut right = from_hex(&"a5".repeat(WIDTH));
        right.shr(WIDTH * 8);
        assert_eq!(right, WideUint::zero());
    }

    #[test]
    fn test_shl_then_shr_restores_value() {
        let original = from_hex("0123456789abcdef0123456789abcdef");
        for n in [1, 4, 7, 8, 11, 13, 64] {
            let mut value = original.clone();
            value.shl(n);
            value.shr(n);
            assert_eq!(value, original, "shift by {} lost bits", n);
        }
    }

    #[test]
    fn test_low_bits_masks() {
        let value = WideUint::from_be_bytes(&[0xab, 0xcd]).unwrap();
        assert_eq!(value.low_bits(0), 0);
        assert_eq!(value.low_bits(4), 0xd);
        assert_eq!(value.low_bits(11), 0x3cd);
        assert_eq!(value.low_bits(16), 0xabcd);
    }

    #[test]
    fn test_split_words_orders_most_significant_first() {
        // 0b00000000001_00000000010_00000000011 packed into 33 bits.
        let mut value = WideUint::zero();
        for index in [1u16, 2, 3] {
            value.shl(11);
            value.or_low(index);
        }

        let indices = split_words(&value, 3);
        assert_eq!(indices.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_join_words_inverts_split_words() {
        let indices = [0u16, 2047, 1024, 3, 1, 777, 2046, 5, 0, 0, 1999, 42];
        let value = join_words(&indices);
        assert_eq!(split_words(&value, indices.len()).as_slice(), &indices);
    }

    #[test]
    fn test_join_words_full_width() {
        let value = join_words(&[2047u16; 24]);
        assert_eq!(
            value.to_be_bytes(WIDTH).as_slice(),
            vec![0xffu8; WIDTH].as_slice()
        );
    }
}
