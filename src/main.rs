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

mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mnemos::{generate_entropy, strip_checksum, Codec, MnemonicLength};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(
    name = "mnemos",
    version,
    author,
    about = "BIP-39 mnemonic generation, verification and seed derivation"
)]
struct Cli {
    #[arg(short, long, value_enum, default_value = "generate")]
    mode: Mode,

    #[arg(short, long, value_enum, default_value = "24")]
    words: Words,

    /// Print only the result
    #[arg(short, long)]
    quiet: bool,

    /// Log to stderr; repeat for more detail (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Mode {
    Generate,
    Seed,
    Verify,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Words {
    #[value(name = "12")]
    Twelve,
    #[value(name = "15")]
    Fifteen,
    #[value(name = "18")]
    Eighteen,
    #[value(name = "21")]
    TwentyOne,
    #[value(name = "24")]
    TwentyFour,
}

impl From<Words> for MnemonicLength {
    fn from(words: Words) -> Self {
        match words {
            Words::Twelve => MnemonicLength::Words12,
            Words::Fifteen => MnemonicLength::Words15,
            Words::Eighteen => MnemonicLength::Words18,
            Words::TwentyOne => MnemonicLength::Words21,
            Words::TwentyFour => MnemonicLength::Words24,
        }
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = FmtSubscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let codec = Codec::english();
    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    tracing::info!(mode = ?cli.mode, "starting");

    match cli.mode {
        Mode::Generate => {
            let length = MnemonicLength::from(cli.words);
            let entropy = generate_entropy(length.entropy_bits())?;
            let mnemonic = codec.marshal_entropy(&entropy)?;
            ui::display_mnemonic(&mnemonic, length, codec.wordlist(), &options);
        }
        Mode::Seed => {
            let mnemonic = ui::prompt_mnemonic()?;
            let passphrase = ui::prompt_passphrase()?;

            let start = Instant::now();
            let seed = codec
                .derive_seed(&mnemonic, &passphrase)
                .context("Mnemonic rejected")?;
            let elapsed = start.elapsed();

            ui::display_seed(&seed, !passphrase.is_empty(), elapsed, &options);
        }
        Mode::Verify => {
            let mnemonic = ui::prompt_mnemonic()?;
            let checksummed = codec
                .unmarshal_entropy(&mnemonic)
                .context("Mnemonic rejected")?;
            let entropy = strip_checksum(&checksummed)?;
            let length = MnemonicLength::from_word_count(mnemonic.split(' ').count())?;

            ui::display_verification(&entropy, &checksummed, length, &options);
        }
    }

    Ok(())
}
