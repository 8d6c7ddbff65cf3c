//! Engine constants for seedfarm.
//!
//! Address sizes follow Ethereum; scan defaults match the reference
//! deployment (one worker per CPU, a progress report every 30 seconds).

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of Ethereum address in bytes (20 bytes = 160 bits).
pub const ETH_ADDRESS_SIZE: usize = 20;

/// Length of a canonical (unprefixed) address in hex characters.
pub const ETH_ADDRESS_HEX_LEN: usize = ETH_ADDRESS_SIZE * 2;

/// Size of keccak256 hash output.
pub const KECCAK256_SIZE: usize = 32;

/// Prefix carried by generated addresses and stripped on normalization.
pub const HEX_PREFIX: &str = "0x";

// ═══════════════════════════════════════════════════════════════════════════════
// SCAN ENGINE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default interval between throughput reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Worker count used when available parallelism cannot be determined.
pub const FALLBACK_WORKER_COUNT: usize = 1;

// ═══════════════════════════════════════════════════════════════════════════════
// MNEMONIC CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Number of words in the reference vocabulary.
pub const VOCABULARY_SIZE: usize = 2048;

/// CRC-32 (IEEE) of the newline-terminated BIP-39 English word list.
///
/// ```text
/// $ wget https://raw.githubusercontent.com/bitcoin/bips/master/bip-0039/english.txt
/// $ crc32 english.txt
/// c1dbd296
/// ```
pub const VOCABULARY_CRC32: u32 = 0xc1db_d296;

/// Token separator (and terminator) of compact codes.
pub const COMPACT_CODE_SEPARATOR: char = '.';

/// Default number of words in a generated phrase (128 bits of entropy).
pub const DEFAULT_MNEMONIC_WORDS: usize = 12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_len() {
        assert_eq!(ETH_ADDRESS_HEX_LEN, 40);
    }

    #[test]
    fn test_default_report_interval() {
        assert_eq!(DEFAULT_REPORT_INTERVAL.as_secs(), 30);
    }

    #[test]
    fn test_vocabulary_size_is_power_of_two() {
        // 11 bits per word
        assert_eq!(VOCABULARY_SIZE, 1 << 11);
    }
}
