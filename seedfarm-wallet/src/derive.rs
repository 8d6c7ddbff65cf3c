//! Key and address derivation.
//!
//! ## Derivation Flow
//!
//! ```text
//! phrase + passphrase
//!       ↓  PBKDF2-HMAC-SHA512 (BIP-39)
//! seed (64 bytes)
//!       ↓  BIP-32 along the derivation path
//! secp256k1 secret key
//!       ↓
//! uncompressed public key (0x04 || X || Y)
//!       ↓
//! eth_address = keccak256(X || Y)[12..32]
//! ```

use bip32::{ChildNumber, DerivationPath, XPrv};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroize;

use seedfarm_core::constants::{ETH_ADDRESS_SIZE, KECCAK256_SIZE};
use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::types::EthAddress;

use crate::hash::keccak256;

/// go-ethereum's base derivation path (`accounts.DefaultBaseDerivationPath`).
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0";

/// Path of the first account as used by most Ethereum wallets.
pub const FIRST_ACCOUNT_PATH: &str = "m/44'/60'/0'/0/0";

/// Returns [`DEFAULT_DERIVATION_PATH`] without going through the parser.
pub fn default_derivation_path() -> DerivationPath {
    let hardened = |index: u32| ChildNumber(index | ChildNumber::HARDENED_FLAG);
    let mut path = DerivationPath::default();
    for child in [hardened(44), hardened(60), hardened(0), ChildNumber(0)] {
        path.push(child);
    }
    path
}

/// Parses a BIP-32 derivation path such as `m/44'/60'/0'/0`.
pub fn parse_path(path: &str) -> Result<DerivationPath> {
    path.parse()
        .map_err(|e| SeedfarmError::ConfigError(format!("derivation path {path:?}: {e}")))
}

/// Derives the extended private key at `path` from a BIP-39 seed.
pub fn derive_private_key(seed: &[u8], path: &DerivationPath) -> Result<XPrv> {
    XPrv::derive_from_path(seed, path)
        .map_err(|e| SeedfarmError::Generation(format!("derive key: {e}")))
}

/// Derives the Ethereum address controlled by `key`.
pub fn eth_address(key: &SigningKey) -> EthAddress {
    let point = key.verifying_key().as_affine().to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag
    let hash = keccak256(&point.as_bytes()[1..]);

    let mut address = [0u8; ETH_ADDRESS_SIZE];
    address.copy_from_slice(&hash[KECCAK256_SIZE - ETH_ADDRESS_SIZE..]);
    EthAddress::from_array(address)
}

/// Returns the hex encoding of the 32-byte secret scalar.
pub fn private_key_hex(key: &XPrv) -> String {
    let mut bytes = key.to_bytes();
    let encoded = hex::encode(bytes);
    bytes.zeroize();
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_seed() -> [u8; 64] {
        let mnemonic = bip39::Mnemonic::parse_in_normalized(
            bip39::Language::English,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        mnemonic.to_seed_normalized("")
    }

    #[test]
    fn test_parse_path() {
        assert!(parse_path(DEFAULT_DERIVATION_PATH).is_ok());
        assert!(parse_path(FIRST_ACCOUNT_PATH).is_ok());
        assert!(matches!(
            parse_path("44/60/not-a-path"),
            Err(SeedfarmError::ConfigError(_))
        ));
    }

    #[test]
    fn test_default_derivation_path_matches_parsed() {
        let built = default_derivation_path();
        assert_eq!(built, parse_path(DEFAULT_DERIVATION_PATH).unwrap());
        assert_eq!(built.to_string(), DEFAULT_DERIVATION_PATH);
    }

    #[test]
    fn test_known_first_account_address() {
        let path = parse_path(FIRST_ACCOUNT_PATH).unwrap();
        let key = derive_private_key(&test_seed(), &path).unwrap();

        let address = eth_address(key.private_key());
        assert_eq!(
            address.to_hex_string(),
            "0x9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let path = parse_path(DEFAULT_DERIVATION_PATH).unwrap();
        let a = derive_private_key(&test_seed(), &path).unwrap();
        let b = derive_private_key(&test_seed(), &path).unwrap();

        assert_eq!(private_key_hex(&a), private_key_hex(&b));
        assert_eq!(eth_address(a.private_key()), eth_address(b.private_key()));
    }

    #[test]
    fn test_paths_produce_different_keys() {
        let base = derive_private_key(&test_seed(), &parse_path(DEFAULT_DERIVATION_PATH).unwrap()).unwrap();
        let first = derive_private_key(&test_seed(), &parse_path(FIRST_ACCOUNT_PATH).unwrap()).unwrap();

        assert_ne!(private_key_hex(&base), private_key_hex(&first));
    }

    #[test]
    fn test_private_key_hex_length() {
        let key = derive_private_key(&test_seed(), &parse_path(DEFAULT_DERIVATION_PATH).unwrap()).unwrap();
        let hex_key = private_key_hex(&key);
        assert_eq!(hex_key.len(), 64);
        assert!(hex_key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
