//! Scanner configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use seedfarm_core::constants::{DEFAULT_REPORT_INTERVAL, FALLBACK_WORKER_COUNT};
use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::signal::StopCause;

/// What a worker does after a confirmed match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Notify, then stop the whole run.
    StopOnMatch,
    /// Notify and keep scanning; notifier errors are only logged.
    KeepScanning,
    /// Keep scanning while matches are recorded; stop if recording fails.
    #[default]
    StopOnNotifyFailure,
}

impl MatchPolicy {
    /// All policies, in CLI order.
    pub const ALL: [MatchPolicy; 3] = [
        MatchPolicy::StopOnMatch,
        MatchPolicy::KeepScanning,
        MatchPolicy::StopOnNotifyFailure,
    ];

    /// Returns the cause to stop with after a match, given whether the
    /// notifier succeeded. `None` keeps the run going.
    pub fn stop_cause(self, notified: bool) -> Option<StopCause> {
        match self {
            MatchPolicy::StopOnMatch => Some(StopCause::MatchFound),
            MatchPolicy::KeepScanning => None,
            MatchPolicy::StopOnNotifyFailure if notified => None,
            MatchPolicy::StopOnNotifyFailure => Some(StopCause::NotifyFailed),
        }
    }

    /// Returns the kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::StopOnMatch => "stop-on-match",
            MatchPolicy::KeepScanning => "keep-scanning",
            MatchPolicy::StopOnNotifyFailure => "stop-on-notify-failure",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = SeedfarmError;

    fn from_str(s: &str) -> Result<Self> {
        MatchPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| {
                SeedfarmError::ConfigError(format!(
                    "unknown match policy {s:?}, expected one of: stop-on-match, keep-scanning, stop-on-notify-failure"
                ))
            })
    }
}

/// Scanner configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Minimum time between progress reports
    pub report_interval: Duration,
    /// What to do after a match
    pub match_policy: MatchPolicy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKER_COUNT);

        Self {
            workers,
            report_interval: DEFAULT_REPORT_INTERVAL,
            match_policy: MatchPolicy::default(),
        }
    }
}

impl ScannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the progress report interval.
    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Sets the match policy.
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(SeedfarmError::ConfigError(
                "worker count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
