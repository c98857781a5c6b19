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
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

const ENGLISH_DATA: &str = include_str!("../assets/bip39_english.txt");

#[cfg(test)]
const ENGLISH_SHA256: &str = "2f5eed53a4727b4bf8880d8f3f199efc90e58503646d9ff8eff3a2ed3b24dbda";

pub const WORDLIST_SIZE: usize = 2048;

static ENGLISH: OnceLock<Arc<Wordlist>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
        }
    }

    /// The shared table for this language, built on first use.
    pub fn wordlist(self) -> Arc<Wordlist> {
        let cell = match self {
            Self::English => &ENGLISH,
        };
        Arc::clone(cell.get_or_init(|| Arc::new(load_embedded(ENGLISH_DATA, self))))
    }
}

fn load_embedded(data: &'static str, language: Language) -> Wordlist {
    let words: Vec<&'static str> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    assert_eq!(
        words.len(),
        WORDLIST_SIZE,
        "Wordlist must contain exactly 2048 words"
    );

    let mut wordlist = Wordlist::from_words(words)
        .unwrap_or_else(|e| panic!("{} wordlist is corrupted: {}", language.name(), e));
    wordlist.language = Some(language);

    tracing::debug!(language = language.name(), "built wordlist table");
    wordlist
}

/// An immutable two-way mapping between word indices `0..2048` and words.
///
/// Both directions are built together from one ordered list and never
/// mutated afterwards.
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u16>,
    language: Option<Language>,
}

impl Wordlist {
    /// Builds a table from exactly 2048 unique, non-empty words without
    /// whitespace, in index order.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();

        if words.len() != WORDLIST_SIZE {
            return Err(Error::InvalidWordlist(format!(
                "expected {} words, got {}",
                WORDLIST_SIZE,
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORDLIST_SIZE);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(Error::InvalidWordlist(format!("word {} is empty", i)));
            }
            if word.chars().any(char::is_whitespace) {
                return Err(Error::InvalidWordlist(format!(
                    "word {} (\"{}\") contains whitespace",
                    i, word
                )));
            }
            if let Some(first) = index.insert(word.clone(), i as u16) {
                return Err(Error::InvalidWordlist(format!(
                    "\"{}\" appears at both {} and {}",
                    word, first, i
                )));
            }
        }

        Ok(Self {
            words,
            index,
            language: None,
        })
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(usize::from(index)).map(String::as_str)
    }

    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Lookup for an 11-bit index; the table always has 2048 entries.
    pub(crate) fn word_at(&self, index: u16) -> &str {
        &self.words[usize::from(index & 0x07ff)]
    }
}

impl fmt::Debug for Wordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wordlist")
            .field("language", &self.language)
            .field("len", &self.words.len())
            .finish()
    }
}
