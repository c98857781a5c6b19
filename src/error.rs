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

/// Errors returned by the mnemonic codec, the seed deriver and the entropy generator.
///
/// Every variant is a local validation failure. Nothing is partially computed
/// when one of them is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid entropy length: {0} bits (expected 128, 160, 192, 224 or 256)")]
    InvalidEntropyLength(usize),

    #[error("invalid mnemonic length: {0} words (expected 12, 15, 18, 21 or 24)")]
    InvalidMnemonicLength(usize),

    #[error("unknown word \"{word}\" at position {position}")]
    UnknownWord { position: usize, word: String },

    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    #[error("random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("invalid wordlist: {0}")]
    InvalidWordlist(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::RandomSourceFailure(e.to_string())
    }
}
