//! Shared scan progress.
//!
//! One [`ScanProgress`] is shared by every worker for the lifetime of a run.
//! Counters are plain atomics, so recording an attempt never blocks. The
//! periodic report goes through a gate taken only with `try_lock`: whichever
//! worker gets it reports, the others carry on scanning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Point-in-time view of the attempt counter, as emitted by a progress report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Whole seconds since the run started
    pub elapsed_secs: u64,
    /// Completed attempts
    pub attempts: u64,
    /// Attempts per second, `None` during the first second
    pub attempts_per_sec: Option<u64>,
}

impl ProgressSnapshot {
    fn new(elapsed_secs: u64, attempts: u64) -> Self {
        Self {
            elapsed_secs,
            attempts,
            attempts_per_sec: attempts.checked_div(elapsed_secs),
        }
    }
}

/// Counters and report timing shared across workers.
#[derive(Debug)]
pub struct ScanProgress {
    attempts: AtomicU64,
    matches: AtomicU64,
    generation_errors: AtomicU64,
    check_errors: AtomicU64,
    started: Instant,
    report_interval: Duration,
    /// Milliseconds since `started` at the last report
    last_report_ms: AtomicU64,
    report_gate: Mutex<()>,
}

impl ScanProgress {
    /// Starts tracking a run now.
    pub fn new(report_interval: Duration) -> Self {
        Self {
            attempts: AtomicU64::new(0),
            matches: AtomicU64::new(0),
            generation_errors: AtomicU64::new(0),
            check_errors: AtomicU64::new(0),
            started: Instant::now(),
            report_interval,
            last_report_ms: AtomicU64::new(0),
            report_gate: Mutex::new(()),
        }
    }

    /// Counts one completed generate-check cycle. Returns the new total.
    pub fn record_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Counts a confirmed match.
    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a failed generation.
    pub fn record_generation_error(&self) {
        self.generation_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a failed existence check.
    pub fn record_check_error(&self) {
        self.check_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns completed attempts.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns confirmed matches.
    pub fn matches(&self) -> u64 {
        self.matches.load(Ordering::Relaxed)
    }

    /// Returns failed generations.
    pub fn generation_errors(&self) -> u64 {
        self.generation_errors.load(Ordering::Relaxed)
    }

    /// Returns failed existence checks.
    pub fn check_errors(&self) -> u64 {
        self.check_errors.load(Ordering::Relaxed)
    }

    /// Returns time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn interval_ms(&self) -> u64 {
        u64::try_from(self.report_interval.as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns true if a report interval has passed since the last report.
    pub fn report_due(&self) -> bool {
        let last = self.last_report_ms.load(Ordering::Acquire);
        self.elapsed_ms().saturating_sub(last) >= self.interval_ms()
    }

    /// Takes a snapshot if a report is due and no other worker is reporting.
    ///
    /// Never blocks. Returns `None` if the interval has not passed or the
    /// gate is held.
    pub fn try_report(&self) -> Option<ProgressSnapshot> {
        if !self.report_due() {
            return None;
        }

        let _gate = self.report_gate.try_lock()?;
        // Another worker may have reported between the check and the lock
        if !self.report_due() {
            return None;
        }

        let elapsed_ms = self.elapsed_ms();
        let snapshot = ProgressSnapshot::new(elapsed_ms / 1000, self.attempts());
        self.last_report_ms.store(elapsed_ms, Ordering::Release);
        Some(snapshot)
    }

    /// Emits a `scan progress` event if a report is due.
    pub fn maybe_report(&self) {
        let Some(snapshot) = self.try_report() else {
            return;
        };

        match snapshot.attempts_per_sec {
            Some(rate) => info!(
                elapsed_secs = snapshot.elapsed_secs,
                attempts = snapshot.attempts,
                attempts_per_sec = rate,
                "scan progress"
            ),
            None => info!(
                elapsed_secs = snapshot.elapsed_secs,
                attempts = snapshot.attempts,
                "scan progress"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters() {
        let progress = ScanProgress::new(Duration::from_secs(30));
        assert_eq!(progress.record_attempt(), 1);
        assert_eq!(progress.record_attempt(), 2);
        progress.record_match();
        progress.record_generation_error();
        progress.record_check_error();
        progress.record_check_error();

        assert_eq!(progress.attempts(), 2);
        assert_eq!(progress.matches(), 1);
        assert_eq!(progress.generation_errors(), 1);
        assert_eq!(progress.check_errors(), 2);
    }

    #[test]
    fn test_no_lost_increments() {
        let progress = Arc::new(ScanProgress::new(Duration::from_secs(30)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let progress = progress.clone();
                std::thread::spawn(move || {
                    for _ in 0..10_000 {
                        progress.record_attempt();
                        progress.maybe_report();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.attempts(), 80_000);
    }

    #[test]
    fn test_report_not_due_before_interval() {
        let progress = ScanProgress::new(Duration::from_secs(3600));
        progress.record_attempt();
        assert!(!progress.report_due());
        assert!(progress.try_report().is_none());
    }

    #[test]
    fn test_report_once_per_interval() {
        let progress = ScanProgress::new(Duration::from_millis(50));
        for _ in 0..5 {
            progress.record_attempt();
        }
        std::thread::sleep(Duration::from_millis(60));

        let snapshot = progress.try_report().unwrap();
        assert_eq!(snapshot.attempts, 5);
        assert_eq!(snapshot.elapsed_secs, 0);
        assert_eq!(snapshot.attempts_per_sec, None);

        assert!(progress.try_report().is_none());

        std::thread::sleep(Duration::from_millis(60));
        assert!(progress.try_report().is_some());
    }

    #[test]
    fn test_report_skipped_while_gate_held() {
        let progress = ScanProgress::new(Duration::ZERO);
        let _held = progress.report_gate.lock();
        assert!(progress.report_due());
        assert!(progress.try_report().is_none());
    }

    #[test]
    fn test_snapshot_rate() {
        let snapshot = ProgressSnapshot::new(4, 1000);
        assert_eq!(snapshot.attempts_per_sec, Some(250));
        assert_eq!(ProgressSnapshot::new(0, 1000).attempts_per_sec, None);
    }
}
