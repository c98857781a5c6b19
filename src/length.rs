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

use crate::error::{Error, Result};

pub const BITS_PER_WORD: usize = 11;
pub const MIN_ENTROPY_BITS: usize = 128;
pub const MAX_ENTROPY_BITS: usize = 256;

/// The five mnemonic sizes, each tied to one entropy size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MnemonicLength {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl MnemonicLength {
    pub const ALL: [Self; 5] = [
        Self::Words12,
        Self::Words15,
        Self::Words18,
        Self::Words21,
        Self::Words24,
    ];

    pub fn from_entropy_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::Words12),
            160 => Ok(Self::Words15),
            192 => Ok(Self::Words18),
            224 => Ok(Self::Words21),
            256 => Ok(Self::Words24),
            _ => Err(Error::InvalidEntropyLength(bits)),
        }
    }

    pub fn from_word_count(count: usize) -> Result<Self> {
        match count {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            _ => Err(Error::InvalidMnemonicLength(count)),
        }
    }

    pub const fn entropy_bits(self) -> usize {
        match self {
            Self::Words12 => 128,
            Self::Words15 => 160,
            Self::Words18 => 192,
            Self::Words21 => 224,
            Self::Words24 => 256,
        }
    }

    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    /// One checksum bit per 32 bits of entropy.
    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }

    pub const fn word_count(self) -> usize {
        (self.entropy_bits() + self.checksum_bits()) / BITS_PER_WORD
    }
}

/// Accepts 128..=256 bits in steps of 32.
pub fn validate_entropy_bits(bits: usize) -> Result<()> {
    if bits % 32 != 0 || !(MIN_ENTROPY_BITS..=MAX_ENTROPY_BITS).contains(&bits) {
        return Err(Error::InvalidEntropyLength(bits));
    }
    Ok(())
}
