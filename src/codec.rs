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

use crate::bits::{join_words, split_words};
use crate::checksum::append_checksum;
use crate::error::{Error, Result};
use crate::length::MnemonicLength;
use crate::seed::{derive_seed_unchecked, Seed};
use crate::wordlist::{Language, Wordlist};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Converts between entropy and mnemonics over one wordlist.
///
/// A codec is cheap to clone; clones share the same read-only table.
#[derive(Debug, Clone)]
pub struct Codec {
    wordlist: Arc<Wordlist>,
}

impl Codec {
    /// A codec over a caller-supplied list of exactly 2048 unique words.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::from_wordlist(Arc::new(Wordlist::from_words(words)?)))
    }

    pub fn from_wordlist(wordlist: Arc<Wordlist>) -> Self {
        Self { wordlist }
    }

    pub fn for_language(language: Language) -> Self {
        Self::from_wordlist(language.wordlist())
    }

    pub fn english() -> Self {
        Self::for_language(Language::English)
    }

    pub fn wordlist(&self) -> &Wordlist {
        &self.wordlist
    }

    /// Encodes 16, 20, 24, 28 or 32 bytes of entropy as 12 to 24 words joined
    /// by single spaces.
    pub fn marshal_entropy(&self, entropy: &[u8]) -> Result<Zeroizing<String>> {
        let length = MnemonicLength::from_entropy_bits(entropy.len() * 8)?;

        let checksummed = append_checksum(entropy)?;
        let indices = split_words(&checksummed, length.word_count());

        let words: Vec<&str> = indices
            .iter()
            .map(|&index| self.wordlist.word_at(index))
            .collect();

        tracing::trace!(words = words.len(), "marshalled entropy");
        Ok(Zeroizing::new(words.join(" ")))
    }

    /// Decodes a mnemonic and verifies its checksum.
    ///
    /// Returns the checksummed entropy: the entropy followed by its checksum
    /// bits, as one big-endian integer of `entropy_bytes + 1` bytes. Use
    /// [`strip_checksum`](crate::checksum::strip_checksum) for the entropy alone.
    pub fn unmarshal_entropy(&self, mnemonic: &str) -> Result<Zeroizing<Vec<u8>>> {
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        let word_count = words.len();

        if word_count % 3 != 0 || !(12..=24).contains(&word_count) {
            return Err(Error::InvalidMnemonicLength(word_count));
        }
        let length = MnemonicLength::from_word_count(word_count)?;

        let checksum_bits = length.checksum_bits();
        let full_byte_size = length.entropy_bytes() + 1;
        let checksum_byte_size = full_byte_size - (full_byte_size % 4);

        let mut indices: Zeroizing<Vec<u16>> = Zeroizing::new(Vec::with_capacity(word_count));
        for (position, word) in words.iter().enumerate() {
            let index = self
                .wordlist
                .index_of(word)
                .ok_or_else(|| Error::UnknownWord {
                    position,
                    word: (*word).to_string(),
                })?;
            indices.push(index);
        }

        let checksummed = join_words(&indices);

        let mut raw = checksummed.clone();
        raw.shr(checksum_bits);
        let raw_bytes = raw.to_be_bytes(checksum_byte_size);

        let expected = append_checksum(&raw_bytes)?.to_be_bytes(full_byte_size);
        let actual = checksummed.to_be_bytes(full_byte_size);
        if *expected != *actual {
            return Err(Error::ChecksumMismatch);
        }

        Ok(actual)
    }

    pub fn validate(&self, mnemonic: &str) -> Result<()> {
        self.unmarshal_entropy(mnemonic).map(|_| ())
    }

    /// Validates `mnemonic`, then derives the seed from the mnemonic text as
    /// supplied (not from the decoded entropy).
    pub fn derive_seed(&self, mnemonic: &str, passphrase: &str) -> Result<Seed> {
        self.validate(mnemonic)?;
        Ok(derive_seed_unchecked(mnemonic, passphrase))
    }
}
