//! Ethereum wallet candidate generator.
//!
//! Every call draws fresh entropy from the OS, turns it into a BIP-39
//! phrase and walks the configured BIP-32 path to an Ethereum key.

use bip32::DerivationPath;
use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::instrument;
use zeroize::Zeroize;

use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::traits::CandidateGenerator;
use seedfarm_core::types::WalletCandidate;

use crate::derive::{default_derivation_path, derive_private_key, eth_address, parse_path, private_key_hex};

/// Largest entropy size accepted by BIP-39, in bytes.
const MAX_ENTROPY_BYTES: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Phrase length, and with it the amount of entropy drawn per candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MnemonicStrength {
    /// 128 bits, 12 words
    #[default]
    Words12,
    /// 160 bits, 15 words
    Words15,
    /// 192 bits, 18 words
    Words18,
    /// 224 bits, 21 words
    Words21,
    /// 256 bits, 24 words
    Words24,
}

impl MnemonicStrength {
    /// Returns the strength for a phrase of `words` words.
    pub fn from_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            15 => Ok(Self::Words15),
            18 => Ok(Self::Words18),
            21 => Ok(Self::Words21),
            24 => Ok(Self::Words24),
            other => Err(SeedfarmError::ConfigError(format!(
                "unsupported phrase length {other}, expected 12, 15, 18, 21 or 24"
            ))),
        }
    }

    /// Returns the entropy size in bytes.
    pub fn entropy_bytes(self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words15 => 20,
            Self::Words18 => 24,
            Self::Words21 => 28,
            Self::Words24 => 32,
        }
    }

    /// Returns the number of words in the phrase.
    pub fn word_count(self) -> usize {
        self.entropy_bytes() * 3 / 4
    }
}

/// Generator settings.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Phrase length
    pub strength: MnemonicStrength,
    /// BIP-32 path walked from the seed
    pub path: DerivationPath,
    /// BIP-39 passphrase mixed into the seed
    pub passphrase: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strength: MnemonicStrength::default(),
            path: default_derivation_path(),
            passphrase: String::new(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the phrase length.
    pub fn with_strength(mut self, strength: MnemonicStrength) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the derivation path from its text form.
    pub fn with_path(mut self, path: &str) -> Result<Self> {
        self.path = parse_path(path)?;
        Ok(self)
    }

    /// Sets the BIP-39 passphrase.
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Generates random Ethereum wallets from fresh BIP-39 phrases.
#[derive(Clone, Debug, Default)]
pub struct EthWalletGenerator {
    config: GeneratorConfig,
}

impl EthWalletGenerator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a candidate from fresh OS entropy.
    pub fn generate_candidate(&self) -> Result<WalletCandidate> {
        let mut entropy = [0u8; MAX_ENTROPY_BYTES];
        let len = self.config.strength.entropy_bytes();

        let drawn = OsRng
            .try_fill_bytes(&mut entropy[..len])
            .map_err(|e| SeedfarmError::Generation(format!("entropy: {e}")));
        let mnemonic = drawn.and_then(|()| {
            Mnemonic::from_entropy(&entropy[..len])
                .map_err(|e| SeedfarmError::Generation(format!("mnemonic: {e}")))
        });
        entropy.zeroize();

        self.candidate_from_mnemonic(&mnemonic?)
    }

    /// Rebuilds the candidate for an existing phrase.
    ///
    /// The phrase is validated against the BIP-39 English list, checksum
    /// included.
    #[instrument(skip_all)]
    pub fn from_phrase(&self, phrase: &str) -> Result<WalletCandidate> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| SeedfarmError::Generation(format!("invalid phrase: {e}")))?;
        self.candidate_from_mnemonic(&mnemonic)
    }

    fn candidate_from_mnemonic(&self, mnemonic: &Mnemonic) -> Result<WalletCandidate> {
        let mut seed = mnemonic.to_seed_normalized(&self.config.passphrase);
        let key = derive_private_key(&seed, &self.config.path);
        seed.zeroize();
        let key = key?;

        let address = eth_address(key.private_key());
        let phrase = mnemonic
            .to_string()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(WalletCandidate::new(
            address.to_hex_string(),
            private_key_hex(&key),
            phrase,
        ))
    }
}

impl CandidateGenerator for EthWalletGenerator {
    fn generate(&self) -> Result<WalletCandidate> {
        self.generate_candidate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::FIRST_ACCOUNT_PATH;
    use test_case::test_case;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_default_config_uses_base_path() {
        let config = GeneratorConfig::default();
        assert_eq!(config.path, parse_path(crate::DEFAULT_DERIVATION_PATH).unwrap());
        assert_eq!(config.strength, MnemonicStrength::Words12);
        assert!(config.passphrase.is_empty());
    }

    #[test]
    fn test_generate_default_candidate() {
        let candidate = EthWalletGenerator::new().generate_candidate().unwrap();

        assert_eq!(candidate.phrase().len(), 12);
        assert!(candidate.address().starts_with("0x"));
        assert_eq!(candidate.address().len(), 42);
        assert!(candidate.address()[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(candidate.private_key().len(), 64);
        assert_eq!(candidate.canonical_address(), candidate.address()[2..]);
    }

    #[test]
    fn test_generated_phrase_round_trips() {
        let generator = EthWalletGenerator::new();
        let candidate = generator.generate_candidate().unwrap();

        let rebuilt = generator.from_phrase(&candidate.phrase_string()).unwrap();
        assert_eq!(candidate, rebuilt);
    }

    #[test]
    fn test_candidates_are_fresh() {
        let generator = EthWalletGenerator::new();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test_case(MnemonicStrength::Words12, 12)]
    #[test_case(MnemonicStrength::Words15, 15)]
    #[test_case(MnemonicStrength::Words18, 18)]
    #[test_case(MnemonicStrength::Words21, 21)]
    #[test_case(MnemonicStrength::Words24, 24)]
    fn test_strength_word_count(strength: MnemonicStrength, words: usize) {
        assert_eq!(strength.word_count(), words);
        assert_eq!(MnemonicStrength::from_word_count(words).unwrap(), strength);

        let generator =
            EthWalletGenerator::with_config(GeneratorConfig::default().with_strength(strength));
        assert_eq!(generator.generate_candidate().unwrap().phrase().len(), words);
    }

    #[test]
    fn test_unsupported_word_count() {
        assert!(matches!(
            MnemonicStrength::from_word_count(13),
            Err(SeedfarmError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_phrase_is_deterministic() {
        let generator = EthWalletGenerator::new();
        let a = generator.from_phrase(ABANDON_ABOUT).unwrap();
        let b = generator.from_phrase(ABANDON_ABOUT).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.phrase_string(), ABANDON_ABOUT);
    }

    #[test]
    fn test_from_phrase_known_vector() {
        let config = GeneratorConfig::default().with_path(FIRST_ACCOUNT_PATH).unwrap();
        let candidate = EthWalletGenerator::with_config(config)
            .from_phrase(ABANDON_ABOUT)
            .unwrap();

        assert_eq!(
            candidate.address(),
            "0x9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[test]
    fn test_passphrase_changes_wallet() {
        let plain = EthWalletGenerator::new().from_phrase(ABANDON_ABOUT).unwrap();
        let salted = EthWalletGenerator::with_config(
            GeneratorConfig::default().with_passphrase("TREZOR"),
        )
        .from_phrase(ABANDON_ABOUT)
        .unwrap();

        assert_ne!(plain.address(), salted.address());
    }

    #[test]
    fn test_from_phrase_rejects_bad_checksum() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            EthWalletGenerator::new().from_phrase(bad),
            Err(SeedfarmError::Generation(_))
        ));
    }

    #[test]
    fn test_from_phrase_rejects_unknown_word() {
        assert!(EthWalletGenerator::new().from_phrase("notaword hill cube").is_err());
    }

    #[test]
    fn test_generated_phrase_encodes_compactly() {
        let candidate = EthWalletGenerator::new().generate_candidate().unwrap();
        let vocabulary = seedfarm_mnemonic::Vocabulary::english().unwrap();

        let code = vocabulary.encode(candidate.phrase());
        assert_eq!(vocabulary.decode(&code).unwrap(), candidate.phrase());
    }
}
