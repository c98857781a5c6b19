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

use anyhow::{Context, Result};
use console::Style;
use mnemos::seed::PBKDF2_ROUNDS;
use mnemos::{MnemonicLength, Seed, Wordlist};
use rpassword::read_password;
use std::io::{self, Write};
use std::time::Duration;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const PARANOID_ENTROPY_BITS: usize = 256;

pub const MAX_MNEMONIC_BYTES: usize = 4 * 1024;
pub const MAX_PASSPHRASE_BYTES: usize = 1024 * 1024;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn status_style(ok: bool, options: &DisplayOptions) -> Style {
    if !options.color_support {
        Style::new()
    } else if ok {
        Style::new().green()
    } else {
        Style::new().yellow()
    }
}

fn reject_control_characters(s: &str, input_name: &str) -> Result<()> {
    let positions: Vec<String> = s
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos.to_string())
        .collect();

    if !positions.is_empty() {
        anyhow::bail!(
            "{} contains {} control character(s) at position(s): {}",
            input_name,
            positions.len(),
            positions.join(", ")
        );
    }

    Ok(())
}

/// NFKD-normalizes a typed mnemonic and collapses runs of whitespace to single spaces.
pub fn normalize_mnemonic(s: &str) -> Result<Zeroizing<String>> {
    let normalized: Zeroizing<String> = Zeroizing::new(s.nfkd().collect());
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let joined = Zeroizing::new(words.join(" "));
    reject_control_characters(&joined, "Mnemonic")?;
    Ok(joined)
}

/// NFKD only; leading and trailing spaces in a passphrase are significant.
pub fn normalize_passphrase(s: &str) -> Result<Zeroizing<String>> {
    let normalized: Zeroizing<String> = Zeroizing::new(s.nfkd().collect());
    reject_control_characters(&normalized, "Passphrase")?;
    Ok(normalized)
}

pub fn prompt_mnemonic() -> Result<Zeroizing<String>> {
    print!("In [0]: ");
    io::stdout().flush()?;

    let input = Zeroizing::new(read_password().context("Failed to fetch mnemonic")?);

    if input.trim().is_empty() {
        anyhow::bail!("Mnemonic cannot be empty");
    }
    if input.len() > MAX_MNEMONIC_BYTES {
        anyhow::bail!(
            "Mnemonic too long ({} bytes, maximum is {})",
            input.len(),
            MAX_MNEMONIC_BYTES
        );
    }

    normalize_mnemonic(&input)
}

pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    print!("In [1]: ");
    io::stdout().flush()?;

    let input = Zeroizing::new(read_password().context("Failed to fetch passphrase")?);

    if input.len() > MAX_PASSPHRASE_BYTES {
        anyhow::bail!(
            "Passphrase too long ({} bytes, maximum is {})",
            input.len(),
            MAX_PASSPHRASE_BYTES
        );
    }

    normalize_passphrase(&input)
}

pub fn display_mnemonic(
    mnemonic: &str,
    length: MnemonicLength,
    wordlist: &Wordlist,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", mnemonic);
        return;
    }

    println!("Out[0]:\n{}\n", mnemonic);

    let (branch, last) = tree_branches(options.unicode_support);
    let language = wordlist.language().map_or("Custom", |l| l.name());

    println!("Settings:");
    println!("  {} Wordlist   {} ({} words)", branch, language, wordlist.len());
    println!("  {} Source     OS random (CSPRNG)", branch);
    println!(
        "  {} Checksum   SHA-256 ({} bits)",
        branch,
        length.checksum_bits()
    );
    println!("  {} Output     {} words", last, length.word_count());
    println!();

    display_entropy_stats(length.entropy_bits(), mnemonic.len(), options);
}

fn display_entropy_stats(entropy_bits: usize, chars: usize, options: &DisplayOptions) {
    let (status_icon, _) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);

    // Every mnemonic carries at least 128 bits.
    let status_text = if entropy_bits >= PARANOID_ENTROPY_BITS {
        "Paranoid"
    } else {
        "Strong"
    };
    let style = status_style(true, options);

    println!("Stats:");
    println!(
        "  {} Entropy    {} {} bits ({})",
        branch,
        style.apply_to(format!("[{}]", status_icon)),
        style.apply_to(entropy_bits),
        style.apply_to(status_text)
    );
    println!(
        "  {} Length     {} {}",
        last,
        chars,
        if chars == 1 { "char" } else { "chars" }
    );

    println!(
        "\n{} Security: {}",
        style.apply_to(format!("[{}]", status_icon)),
        style.apply_to(status_text)
    );
}

pub fn display_seed(seed: &Seed, has_passphrase: bool, elapsed: Duration, options: &DisplayOptions) {
    let hex = seed.to_hex();

    if options.quiet {
        println!("{}", &**hex);
        return;
    }

    println!("\nOut[0]:\n{}\n", &**hex);

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);
    let passphrase_style = status_style(has_passphrase, options);

    println!("Settings:");
    println!(
        "  {} KDF        PBKDF2-HMAC-SHA512 ({} rounds)",
        branch, PBKDF2_ROUNDS
    );
    println!(
        "  {} Passphrase {} {}",
        branch,
        passphrase_style.apply_to(format!(
            "[{}]",
            if has_passphrase { check_ok } else { check_warn }
        )),
        passphrase_style.apply_to(if has_passphrase { "set" } else { "none" })
    );
    println!("  {} Output     {} bytes", branch, seed.as_bytes().len());
    println!("  {} Time       {:.1}ms", last, elapsed.as_secs_f64() * 1000.0);
}

pub fn display_verification(
    entropy: &[u8],
    checksummed: &[u8],
    length: MnemonicLength,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", hex::encode(entropy));
        return;
    }

    println!("\nOut[0]:\n{}\n", hex::encode(entropy));

    let (check_ok, _) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);
    let style = status_style(true, options);

    let checksum_bits = length.checksum_bits();
    let checksum = checksummed.last().copied().unwrap_or(0) & ((1u16 << checksum_bits) - 1) as u8;

    println!("Mnemonic:");
    println!("  {} Words      {}", branch, length.word_count());
    println!(
        "  {} Checksum   {} {:0width$b}",
        branch,
        style.apply_to(format!("[{}]", check_ok)),
        checksum,
        width = checksum_bits
    );
    println!("  {} Entropy    {} bits", last, length.entropy_bits());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_normalize_mnemonic_collapses_whitespace() {
        let cases = vec![
            ("  legal winner  ", "legal winner"),
            ("legal\twinner\nthank", "legal winner thank"),
            ("legal\u{3000}winner", "legal winner"),
        ];

        for (input, expected) in cases {
            let normalized = normalize_mnemonic(input).unwrap();
            assert_eq!(*normalized, expected);
        }
    }

    #[test]
    fn test_normalize_nfkd() {
        let nfc = "caf\u{e9}";
        let nfd = "cafe\u{301}";

        assert_ne!(nfc.as_bytes(), nfd.as_bytes());

        let normalized_nfc = normalize_passphrase(nfc).unwrap();
        let normalized_nfd = normalize_passphrase(nfd).unwrap();

        assert_eq!(*normalized_nfc, *normalized_nfd);
        assert_eq!(normalized_nfc.as_bytes(), nfd.as_bytes());
    }

    #[test]
    fn test_normalize_compatibility_forms() {
        assert_eq!(*normalize_passphrase("\u{fb01}").unwrap(), "fi");
        assert_eq!(*normalize_passphrase("\u{2460}").unwrap(), "1");
    }

    #[test]
    fn test_passphrase_keeps_outer_spaces() {
        assert_eq!(*normalize_passphrase("  TREZOR ").unwrap(), "  TREZOR ");
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = normalize_passphrase("pass\u{7}word").unwrap_err();
        assert!(err.to_string().contains("position(s): 4"));

        assert!(normalize_mnemonic("legal\u{0}winner").is_err());
    }

    #[test]
    fn test_normalization_idempotent() {
        let input = "cafe\u{301} \u{fb01}";
        let first = normalize_passphrase(input).unwrap();
        let second = normalize_passphrase(&first).unwrap();
        assert_eq!(*first, *second);
    }
}
