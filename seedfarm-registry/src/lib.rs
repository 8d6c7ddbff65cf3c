//! # Seedfarm Registry
//!
//! Known-address lookups and match recording for the scan engine.
//!
//! This crate provides:
//!
//! - **Memory**: Concurrent in-memory address set
//! - **File**: Address set loaded from a newline-separated list
//! - **SQL**: libSQL / Turso lookups (feature `turso`)
//! - **Notifier**: Writes each found wallet to its own file
//!
//! All sets store canonical addresses (lower-case hex, no `0x`), so lookups
//! are case-insensitive.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedfarm_registry::{FileAddressSet, FileNotifier};
//!
//! let checker = FileAddressSet::load("addresses.txt").await?;
//! let notifier = FileNotifier::new("found");
//!
//! if checker.exists(&candidate.canonical_address(), &signal).await? {
//!     notifier.notify(candidate, &signal).await?;
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod file;
mod memory;
mod notifier;
#[cfg(feature = "turso")]
mod sql;

pub use file::FileAddressSet;
pub use memory::MemoryAddressSet;
pub use notifier::FileNotifier;
#[cfg(feature = "turso")]
pub use sql::SqlAddressSet;

// Re-export the traits from core
pub use seedfarm_core::traits::{ExistenceChecker, MatchNotifier};
