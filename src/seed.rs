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

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use std::fmt;
use zeroize::Zeroizing;

pub const SEED_LEN: usize = 64;
pub const PBKDF2_ROUNDS: u32 = 2048;

const SALT_PREFIX: &str = "mnemonic";

/// 64 bytes of key material derived from a mnemonic and a passphrase.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0[..]))
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// `PBKDF2-HMAC-SHA512(mnemonic, "mnemonic" + passphrase, 2048 rounds, 64 bytes)`.
///
/// The mnemonic is used byte for byte as supplied and is not checked against
/// any wordlist; [`Codec::derive_seed`](crate::Codec::derive_seed) validates first.
pub fn derive_seed_unchecked(mnemonic: &str, passphrase: &str) -> Seed {
    let salt = Zeroizing::new(format!("{}{}", SALT_PREFIX, passphrase));
    let mut output = Zeroizing::new([0u8; SEED_LEN]);

    pbkdf2_hmac::<Sha512>(
        mnemonic.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut output[..],
    );

    Seed(output)
}
