//! # Seedfarm Core
//!
//! Core types, errors, and traits shared by every seedfarm crate.
//!
//! This crate provides the foundational building blocks of the scanner:
//!
//! - **Types**: Wallet candidates and canonical address handling
//! - **Errors**: The error taxonomy the scan engine dispatches on
//! - **Constants**: Engine defaults and address sizes
//! - **Traits**: The generator, existence-check and notifier seams
//! - **Signal**: The cancellation signal broadcast to every worker
//!
//! ## Example
//!
//! ```rust
//! use seedfarm_core::{normalize_address, ShutdownSignal, StopCause};
//!
//! assert_eq!(normalize_address("0xAbC0"), "abc0");
//!
//! let signal = ShutdownSignal::new();
//! signal.cancel(StopCause::Shutdown);
//! assert_eq!(signal.cause(), Some(StopCause::Shutdown));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod signal;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, SeedfarmError};
pub use signal::{ShutdownSignal, StopCause};
pub use traits::*;
pub use types::*;
