//! # Seedfarm Wallet
//!
//! Ethereum wallet candidates for the scan engine.
//!
//! This crate provides:
//!
//! - **Generator**: Fresh BIP-39 phrases from OS entropy, turned into
//!   Ethereum wallets
//! - **Derivation**: BIP-32 key derivation and address computation
//! - **Hash**: Keccak-256
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedfarm_wallet::EthWalletGenerator;
//!
//! let generator = EthWalletGenerator::new();
//! let candidate = generator.generate_candidate()?;
//! println!("{}", candidate.address());
//!
//! // Rebuild a wallet from a stored phrase
//! let same = generator.from_phrase(&candidate.phrase_string())?;
//! assert_eq!(candidate, same);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod derive;
pub mod generator;
pub mod hash;

pub use derive::{default_derivation_path, eth_address, parse_path, DEFAULT_DERIVATION_PATH, FIRST_ACCOUNT_PATH};
pub use generator::{EthWalletGenerator, GeneratorConfig, MnemonicStrength};
pub use hash::keccak256;
