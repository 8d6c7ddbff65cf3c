//! Address types for seedfarm.
//!
//! Generators emit `0x`-prefixed hex; the known-address set stores the
//! canonical form (lower-case hex without prefix). Both sides go through
//! [`normalize_address`] so comparisons are case-insensitive.

use serde::{Deserialize, Serialize};

use crate::constants::{ETH_ADDRESS_HEX_LEN, ETH_ADDRESS_SIZE, HEX_PREFIX};
use crate::error::{Result, SeedfarmError};

/// Returns the canonical comparison form of an address.
///
/// Trims whitespace, strips a `0x`/`0X` prefix and lower-cases the rest.
/// No validation is performed.
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    let unprefixed = match trimmed.get(..HEX_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(HEX_PREFIX) => &trimmed[HEX_PREFIX.len()..],
        _ => trimmed,
    };
    unprefixed.to_ascii_lowercase()
}

/// A 20-byte Ethereum address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress {
    bytes: [u8; ETH_ADDRESS_SIZE],
}

impl EthAddress {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ETH_ADDRESS_SIZE {
            return Err(SeedfarmError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ETH_ADDRESS_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; ETH_ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; ETH_ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses from hex string (with or without 0x prefix, any case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let canonical = normalize_address(s);
        if canonical.len() != ETH_ADDRESS_HEX_LEN {
            return Err(SeedfarmError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ETH_ADDRESS_HEX_LEN,
                canonical.len()
            )));
        }
        let bytes = hex::decode(&canonical)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the `0x`-prefixed lower-case hex form.
    pub fn to_hex_string(&self) -> String {
        format!("{HEX_PREFIX}{}", hex::encode(self.bytes))
    }

    /// Returns the canonical form used by existence checkers.
    pub fn canonical(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl std::fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EthAddress({})", self.to_hex_string())
    }
}

impl std::fmt::Display for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0x9858EfFD232B4033E47d90003D41EC34EcaEda94", "9858effd232b4033e47d90003d41ec34ecaeda94" ; "checksummed with prefix")]
    #[test_case("0X9858EFFD232B4033E47D90003D41EC34ECAEDA94", "9858effd232b4033e47d90003d41ec34ecaeda94" ; "upper case prefix")]
    #[test_case("9858effd232b4033e47d90003d41ec34ecaeda94", "9858effd232b4033e47d90003d41ec34ecaeda94" ; "already canonical")]
    #[test_case("  0xabc\n", "abc" ; "surrounding whitespace")]
    #[test_case("", "" ; "empty")]
    fn test_normalize_address(input: &str, expected: &str) {
        assert_eq!(normalize_address(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_address("0xDEADbeef");
        assert_eq!(normalize_address(&once), once);
    }

    #[test]
    fn test_eth_address_from_hex() {
        let addr = EthAddress::from_hex("0x9858EfFD232B4033E47d90003D41EC34EcaEda94").unwrap();
        assert_eq!(addr.canonical(), "9858effd232b4033e47d90003d41ec34ecaeda94");
        assert_eq!(addr.to_hex_string(), "0x9858effd232b4033e47d90003d41ec34ecaeda94");
        assert_eq!(addr.to_string(), addr.to_hex_string());
    }

    #[test]
    fn test_eth_address_rejects_bad_input() {
        assert!(matches!(
            EthAddress::from_hex("0x1234"),
            Err(SeedfarmError::InvalidAddress(_))
        ));
        assert!(matches!(
            EthAddress::from_hex("zz58effd232b4033e47d90003d41ec34ecaeda94"),
            Err(SeedfarmError::HexError(_))
        ));
        assert!(EthAddress::from_bytes(&[0u8; 19]).is_err());
    }

    #[test]
    fn test_generated_form_round_trips_through_normalize() {
        let addr = EthAddress::from_array([0x5A; ETH_ADDRESS_SIZE]);
        let shown = addr.to_hex_string();
        assert!(shown.starts_with(HEX_PREFIX));
        assert_eq!(shown.len(), HEX_PREFIX.len() + ETH_ADDRESS_HEX_LEN);
        assert_eq!(normalize_address(&shown), addr.canonical());
    }

    #[test]
    fn test_eth_address_from_array() {
        let addr = EthAddress::from_array([0xAB; ETH_ADDRESS_SIZE]);
        assert_eq!(addr.as_bytes(), &[0xAB; ETH_ADDRESS_SIZE]);
        assert_eq!(addr.canonical(), "ab".repeat(ETH_ADDRESS_SIZE));
    }
}
