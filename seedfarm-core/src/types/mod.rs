//! Domain types for seedfarm.
//!
//! - [`WalletCandidate`]: A generated address / private key / phrase triple
//! - [`EthAddress`]: A parsed 20-byte Ethereum address
//! - [`normalize_address`]: The canonical form used for existence checks

mod address;
mod wallet;

pub use address::*;
pub use wallet::*;
