//! Error types for seedfarm.
//!
//! The scan engine dispatches on these variants: generation and check
//! failures are retried, cancellation ends a worker quietly, notifier
//! failures may stop the run, and a vocabulary checksum mismatch aborts
//! startup.

use thiserror::Error;

/// Result type alias using `SeedfarmError`.
pub type Result<T> = std::result::Result<T, SeedfarmError>;

/// Main error type for all seedfarm operations.
#[derive(Debug, Error)]
pub enum SeedfarmError {
    // ═══════════════════════════════════════════════════════════════════════════
    // SCAN LOOP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Wallet candidate generation failed.
    #[error("Wallet generation failed: {0}")]
    Generation(String),

    /// Existence check failed.
    #[error("Address check failed: {0}")]
    Check(String),

    /// The shutdown signal was observed inside a collaborator.
    #[error("Operation cancelled")]
    Cancelled,

    /// Recording a found wallet failed.
    #[error("Wallet found notify failed: {0}")]
    Notify(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // COMPACT CODE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A compact code could not be decoded.
    #[error("Invalid compact code: {0}")]
    Format(String),

    /// The reference vocabulary does not match the known word list.
    #[error("Wordlist checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    VocabularyChecksum {
        /// Checksum of the reference list
        expected: u32,
        /// Checksum of the list that was loaded
        actual: u32,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid address format.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),
}

impl SeedfarmError {
    /// Returns true if this error came from observing the shutdown signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SeedfarmError::Cancelled)
    }

    /// Returns true if the scan loop retries after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SeedfarmError::Generation(_) | SeedfarmError::Check(_)
        )
    }

    /// Returns true if this error must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SeedfarmError::VocabularyChecksum { .. })
    }
}
