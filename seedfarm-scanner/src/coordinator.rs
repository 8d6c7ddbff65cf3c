//! The scan coordinator and its workers.
//!
//! ## Worker Loop
//!
//! ```text
//! loop until cancelled:
//!   generate ── error ──→ log, retry
//!      ↓
//!   exists(address) ── Cancelled ──→ exit
//!      │          └── error ──→ log ─┐
//!      ├─ true ──→ notify, apply policy
//!      ↓                             │
//!   count attempt  ←─────────────────┘
//!      ↓
//!   maybe report, yield
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use seedfarm_core::error::Result;
use seedfarm_core::signal::{ShutdownSignal, StopCause};
use seedfarm_core::traits::{CandidateGenerator, ExistenceChecker, MatchNotifier};
use seedfarm_core::types::WalletCandidate;

use crate::config::{MatchPolicy, ScannerConfig};
use crate::progress::ScanProgress;

// ═══════════════════════════════════════════════════════════════════════════════
// SUMMARY
// ═══════════════════════════════════════════════════════════════════════════════

/// Totals of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Completed generate-check cycles
    pub attempts: u64,
    /// Confirmed matches
    pub matches: u64,
    /// Failed generations
    pub generation_errors: u64,
    /// Failed existence checks
    pub check_errors: u64,
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Run duration
    pub elapsed: Duration,
    /// Why the run stopped
    pub cause: Option<StopCause>,
}

impl ScanSummary {
    fn from_progress(
        progress: &ScanProgress,
        started_at: DateTime<Utc>,
        cause: Option<StopCause>,
    ) -> Self {
        Self {
            attempts: progress.attempts(),
            matches: progress.matches(),
            generation_errors: progress.generation_errors(),
            check_errors: progress.check_errors(),
            started_at,
            elapsed: progress.elapsed(),
            cause,
        }
    }

    /// Returns attempts per second over the whole run.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COORDINATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs a pool of workers against shared collaborators.
pub struct ScanCoordinator {
    config: ScannerConfig,
    generator: Arc<dyn CandidateGenerator>,
    checker: Arc<dyn ExistenceChecker>,
    notifier: Arc<dyn MatchNotifier>,
}

impl ScanCoordinator {
    /// Creates a coordinator. Fails if the configuration is invalid.
    pub fn new(
        config: ScannerConfig,
        generator: Arc<dyn CandidateGenerator>,
        checker: Arc<dyn ExistenceChecker>,
        notifier: Arc<dyn MatchNotifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            checker,
            notifier,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scans until `signal` is cancelled, then returns the run totals.
    ///
    /// Returns only after every worker has exited. Without cancellation
    /// (external, or from the match policy) this never returns.
    #[instrument(skip_all, fields(workers = self.config.workers, policy = %self.config.match_policy))]
    pub async fn run(&self, signal: ShutdownSignal) -> ScanSummary {
        let progress = Arc::new(ScanProgress::new(self.config.report_interval));
        let started_at = Utc::now();
        info!("scan started");

        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                generator: Arc::clone(&self.generator),
                checker: Arc::clone(&self.checker),
                notifier: Arc::clone(&self.notifier),
                policy: self.config.match_policy,
                progress: Arc::clone(&progress),
                signal: signal.clone(),
            };
            workers.spawn(worker.run());
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "worker task failed");
            }
        }

        let summary = ScanSummary::from_progress(&progress, started_at, signal.cause());
        info!(
            attempts = summary.attempts,
            matches = summary.matches,
            generation_errors = summary.generation_errors,
            check_errors = summary.check_errors,
            elapsed_secs = summary.elapsed.as_secs(),
            cause = ?summary.cause,
            "scan stopped"
        );
        summary
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WORKER
// ═══════════════════════════════════════════════════════════════════════════════

struct Worker {
    id: usize,
    generator: Arc<dyn CandidateGenerator>,
    checker: Arc<dyn ExistenceChecker>,
    notifier: Arc<dyn MatchNotifier>,
    policy: MatchPolicy,
    progress: Arc<ScanProgress>,
    signal: ShutdownSignal,
}

impl Worker {
    async fn run(self) {
        debug!(worker = self.id, "worker started");

        while !self.signal.is_cancelled() {
            if self.attempt().await.is_break() {
                break;
            }
            tokio::task::yield_now().await;
        }

        debug!(worker = self.id, "worker stopped");
    }

    /// One generate-check-report cycle.
    async fn attempt(&self) -> ControlFlow<()> {
        let candidate = match self.generator.generate() {
            Ok(candidate) => candidate,
            Err(e) => {
                self.progress.record_generation_error();
                warn!(worker = self.id, error = %e, "failed to generate wallet");
                return ControlFlow::Continue(());
            }
        };

        let address = candidate.canonical_address();
        match self.checker.exists(&address, &self.signal).await {
            Ok(false) => {}
            Ok(true) => self.on_match(candidate).await,
            Err(e) if e.is_cancelled() => return ControlFlow::Break(()),
            Err(e) => {
                self.progress.record_check_error();
                warn!(worker = self.id, address = %address, error = %e, "failed to check wallet");
            }
        }

        self.progress.record_attempt();
        self.progress.maybe_report();
        ControlFlow::Continue(())
    }

    async fn on_match(&self, candidate: WalletCandidate) {
        self.progress.record_match();
        let address = candidate.address().to_string();
        info!(worker = self.id, address = %address, "wallet matched");

        let notified = match self.notifier.notify(candidate, &self.signal).await {
            Ok(()) => true,
            Err(e) => {
                error!(worker = self.id, address = %address, error = %e, "failed to notify");
                false
            }
        };

        if let Some(cause) = self.policy.stop_cause(notified) {
            if self.signal.cancel(cause) {
                info!(worker = self.id, cause = %cause, "stopping scan");
            }
        }
    }
}
