//! # Seedfarm Mnemonic
//!
//! Compact storage codes for seed phrases.
//!
//! This crate provides:
//!
//! - **Vocabulary**: The BIP-39 English word list, verified by checksum
//!   before first use
//! - **Compact codes**: A dot-delimited encoding of a phrase where each word
//!   becomes its vocabulary index
//!
//! ## Format
//!
//! ```text
//! squeeze hill cube network ...  →  1692.861.427.1190. ...
//! ```
//!
//! Every token is terminated by `.`. Words outside the vocabulary are
//! written literally; they encode but do not decode, since a literal token
//! cannot be told apart from a malformed one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedfarm_mnemonic::Vocabulary;
//!
//! let vocabulary = Vocabulary::english()?;
//! let code = vocabulary.encode_phrase("squeeze hill cube");
//! assert_eq!(code, "1692.861.427.");
//! assert_eq!(vocabulary.decode_phrase(&code)?, "squeeze hill cube");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod compact;
pub mod vocabulary;

pub use compact::{decode, encode};
pub use vocabulary::{checksum, Vocabulary};
