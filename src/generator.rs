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

use crate::codec::Codec;
use crate::error::Result;
use crate::length::{validate_entropy_bits, MnemonicLength};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Fresh entropy from the operating system's CSPRNG.
pub fn generate_entropy(bit_size: usize) -> Result<Zeroizing<Vec<u8>>> {
    generate_entropy_with(&mut OsRng, bit_size)
}

pub fn generate_entropy_with<R>(rng: &mut R, bit_size: usize) -> Result<Zeroizing<Vec<u8>>>
where
    R: RngCore + CryptoRng,
{
    validate_entropy_bits(bit_size)?;

    let mut entropy = Zeroizing::new(vec![0u8; bit_size / 8]);
    rng.try_fill_bytes(entropy.as_mut_slice())?;

    tracing::debug!(bits = bit_size, "generated entropy");
    Ok(entropy)
}

pub fn generate_mnemonic(codec: &Codec, length: MnemonicLength) -> Result<Zeroizing<String>> {
    let entropy = generate_entropy(length.entropy_bits())?;
    codec.marshal_entropy(&entropy)
}
