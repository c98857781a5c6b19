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

use crate::bits::WideUint;
use crate::error::Result;
use crate::length::MnemonicLength;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Appends the first `entropy_bits / 32` bits of `SHA-256(entropy)` to the
/// low end of `entropy`.
///
/// The result is `entropy << cs | sha256(entropy)[0] >> (8 - cs)`, built one
/// bit at a time, most significant checksum bit first.
pub fn append_checksum(entropy: &[u8]) -> Result<WideUint> {
    let length = MnemonicLength::from_entropy_bits(entropy.len() * 8)?;

    let hash = Sha256::digest(entropy);
    let first_byte = hash[0];

    let mut value = WideUint::from_be_bytes(entropy)?;
    for i in 0..length.checksum_bits() {
        value.shl(1);
        if first_byte & (1 << (7 - i)) != 0 {
            value.or_low(1);
        }
    }

    Ok(value)
}

/// Recovers the raw entropy from checksummed entropy as returned by
/// [`Codec::unmarshal_entropy`](crate::Codec::unmarshal_entropy).
///
/// The input length (17, 21, 25, 29 or 33 bytes) determines the mnemonic
/// length. The checksum bits are dropped without being verified.
pub fn strip_checksum(checksummed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let entropy_bits = checksummed.len().saturating_sub(1) * 8;
    let length = MnemonicLength::from_entropy_bits(entropy_bits)?;

    let mut value = WideUint::from_be_bytes(checksummed)?;
    value.shr(length.checksum_bits());

    Ok(value.to_be_bytes(length.entropy_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::length::BITS_PER_WORD;

    #[test]
    fn test_zero_entropy_checksum() {
        // SHA-256 of 16 zero bytes starts with 0x37, so the checksum nibble is 0x3.
        let value = append_checksum(&[0u8; 16]).unwrap();
        assert_eq!(value.low_bits(4), 0x3);

        let mut expected = vec![0u8; 17];
        expected[16] = 0x03;
        assert_eq!(value.to_be_bytes(17).as_slice(), expected.as_slice());
    }

    #[test]
    fn test_full_byte_checksum() {
        // SHA-256 of 32 zero bytes starts with 0x66.
        let value = append_checksum(&[0u8; 32]).unwrap();
        assert_eq!(value.low_bits(8), 0x66);
        assert_eq!(value.low_bits(BITS_PER_WORD), 102);
    }

    #[test]
    fn test_checksum_shifts_entropy() {
        let value = append_checksum(&[0x7f; 16]).unwrap();
        assert_eq!(
            hex::encode(value.to_be_bytes(17).as_slice()),
            "07f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f8"
        );
    }

    #[test]
    fn test_checksum_bit_counts() {
        for length in MnemonicLength::ALL {
            let entropy = vec![0xa5u8; length.entropy_bytes()];
            let value = append_checksum(&entropy).unwrap();

            let mut shifted = value.clone();
            shifted.shr(length.checksum_bits());
            assert_eq!(
                shifted.to_be_bytes(entropy.len()).as_slice(),
                entropy.as_slice()
            );
        }
    }

    #[test]
    fn test_checksum_rejects_invalid_lengths() {
        assert_eq!(
            append_checksum(&[0u8; 12]).unwrap_err(),
            Error::InvalidEntropyLength(96)
        );
        assert_eq!(
            append_checksum(&[0u8; 36]).unwrap_err(),
            Error::InvalidEntropyLength(288)
        );
        assert!(append_checksum(&[]).is_err());
    }

    #[test]
    fn test_strip_checksum() {
        let checksummed = hex::decode("0808080808080808080808080808080804").unwrap();
        let entropy = strip_checksum(&checksummed).unwrap();
        assert_eq!(entropy.as_slice(), &[0x80u8; 16]);

        let checksummed = hex::decode(format!("{}af", "ff".repeat(32))).unwrap();
        let entropy = strip_checksum(&checksummed).unwrap();
        assert_eq!(entropy.as_slice(), &[0xffu8; 32]);
    }

    #[test]
    fn test_strip_checksum_inverts_append() {
        for length in MnemonicLength::ALL {
            let entropy: Vec<u8> = (0..length.entropy_bytes()).map(|i| i as u8 * 7).collect();
            let checksummed = append_checksum(&entropy)
                .unwrap()
                .to_be_bytes(length.entropy_bytes() + 1);
            assert_eq!(strip_checksum(&checksummed).unwrap().as_slice(), entropy.as_slice());
        }
    }

    #[test]
    fn test_strip_checksum_rejects_invalid_lengths() {
        assert!(strip_checksum(&[]).is_err());
        assert!(strip_checksum(&[0u8; 16]).is_err());
        assert!(strip_checksum(&[0u8; 34]).is_err());
    }
}
