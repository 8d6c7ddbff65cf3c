//! Wallet candidate produced by a generator.
//!
//! A candidate is owned by the worker that generated it. On a match it is
//! moved into the notifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use super::normalize_address;

/// A generated address / private key / seed phrase triple.
///
/// Immutable once produced. The private key and phrase are zeroized when the
/// candidate is dropped, and `Debug` never prints them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ZeroizeOnDrop)]
pub struct WalletCandidate {
    /// Address as produced by the generator (`0x`-prefixed hex)
    address: String,
    /// Hex-encoded private key
    private_key: String,
    /// Seed phrase, in order
    phrase: Vec<String>,
}

impl WalletCandidate {
    /// Creates a candidate.
    pub fn new(
        address: impl Into<String>,
        private_key: impl Into<String>,
        phrase: Vec<String>,
    ) -> Self {
        Self {
            address: address.into(),
            private_key: private_key.into(),
            phrase,
        }
    }

    /// Returns the address as generated.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the canonical address used for existence checks.
    pub fn canonical_address(&self) -> String {
        normalize_address(&self.address)
    }

    /// Returns the hex-encoded private key.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Returns the seed phrase words.
    pub fn phrase(&self) -> &[String] {
        &self.phrase
    }

    /// Returns the seed phrase joined with single spaces.
    pub fn phrase_string(&self) -> String {
        self.phrase.join(" ")
    }
}

impl fmt::Debug for WalletCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCandidate")
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// The full record written when a match is found.
impl fmt::Display for WalletCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ETHAddress: {}", self.address)?;
        writeln!(f, "PrivateKey: {}", self.private_key)?;
        writeln!(f, "Mnemonic: {}", self.phrase_string())
    }
}
