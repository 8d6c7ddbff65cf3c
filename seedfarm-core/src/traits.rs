//! Collaborator traits for the scan engine.
//!
//! The coordinator only knows these three seams. Concrete generators,
//! address stores and notifiers live in their own crates, and tests plug in
//! doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::signal::ShutdownSignal;
use crate::types::WalletCandidate;

// ═══════════════════════════════════════════════════════════════════════════════
// CANDIDATE GENERATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Produces one wallet candidate per call.
///
/// Generation is CPU-bound and must not block on I/O. Failures are treated
/// as transient: the caller logs them and immediately calls again.
pub trait CandidateGenerator: Send + Sync {
    /// Generates a fresh candidate.
    fn generate(&self) -> Result<WalletCandidate>;
}

impl<F> CandidateGenerator for F
where
    F: Fn() -> Result<WalletCandidate> + Send + Sync,
{
    fn generate(&self) -> Result<WalletCandidate> {
        self()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXISTENCE CHECK
// ═══════════════════════════════════════════════════════════════════════════════

/// Point lookup against the set of addresses with recorded history.
///
/// Implementations that block on I/O must observe `signal` and fail with
/// [`SeedfarmError::Cancelled`](crate::SeedfarmError::Cancelled) once it is
/// set, so callers can tell shutdown apart from an ordinary failure.
#[async_trait]
pub trait ExistenceChecker: Send + Sync {
    /// Returns whether the canonical `address` is in the known set.
    async fn exists(&self, address: &str, signal: &ShutdownSignal) -> Result<bool>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// MATCH NOTIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Durably records a found wallet.
///
/// Called at most once per match; takes ownership of the candidate.
#[async_trait]
pub trait MatchNotifier: Send + Sync {
    /// Records `candidate`.
    async fn notify(&self, candidate: WalletCandidate, signal: &ShutdownSignal) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedfarmError;

    fn fixed_candidate() -> Result<WalletCandidate> {
        Ok(WalletCandidate::new(
            "0xABCDEF",
            "00",
            vec!["abandon".to_string()],
        ))
    }

    #[test]
    fn test_closure_is_generator() {
        let generator: Box<dyn CandidateGenerator> = Box::new(fixed_candidate);
        let candidate = generator.generate().unwrap();
        assert_eq!(candidate.address(), "0xABCDEF");
    }

    #[test]
    fn test_failing_closure_is_generator() {
        let generator = || -> Result<WalletCandidate> {
            Err(SeedfarmError::Generation("no entropy".into()))
        };
        assert!(generator.generate().unwrap_err().is_recoverable());
    }
}
