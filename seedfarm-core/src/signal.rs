//! Shutdown signal shared by the scan coordinator and its collaborators.
//!
//! A [`ShutdownSignal`] is a cancellation token plus the reason the run was
//! stopped. Clones share state: cancelling any clone cancels all of them, and
//! the first recorded cause wins.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::error::{Result, SeedfarmError};

/// Why a scan run was stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCause {
    /// External shutdown request (interrupt, terminate, caller).
    Shutdown,
    /// A worker confirmed a match and the policy stops on matches.
    MatchFound,
    /// A match could not be recorded and the policy stops on that.
    NotifyFailed,
}

impl fmt::Display for StopCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopCause::Shutdown => "shutdown",
            StopCause::MatchFound => "wallet found",
            StopCause::NotifyFailed => "wallet found, notify failed",
        };
        f.write_str(s)
    }
}

/// Broadcast cancellation signal with a first-wins cause.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
    cause: Arc<OnceLock<StopCause>>,
}

impl ShutdownSignal {
    /// Creates a signal that is not yet cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token, e.g. one owned by a larger application.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            cause: Arc::new(OnceLock::new()),
        }
    }

    /// Cancels the signal.
    ///
    /// Returns `true` if `cause` was recorded, `false` if an earlier cause
    /// already stopped the run.
    pub fn cancel(&self, cause: StopCause) -> bool {
        let recorded = self.cause.set(cause).is_ok();
        self.token.cancel();
        recorded
    }

    /// Returns true once any clone has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves when the signal is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Returns the recorded stop cause, if any.
    pub fn cause(&self) -> Option<StopCause> {
        self.cause.get().copied()
    }

    /// Fails with [`SeedfarmError::Cancelled`] if the signal is set.
    ///
    /// Collaborators call this before starting blocking work.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SeedfarmError::Cancelled)
        } else {
            Ok(())
        }
    }
}
