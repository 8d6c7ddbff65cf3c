//! # Seedfarm Scanner
//!
//! The concurrent scan engine.
//!
//! ## Features
//!
//! - **Worker Pool**: A fixed number of tokio tasks, each looping
//!   generate → check → count until cancelled
//! - **Lock-free Counting**: Attempts are atomic increments; progress
//!   reports never block a worker
//! - **Match Policies**: Stop on the first match, keep scanning, or stop
//!   only when a match could not be recorded
//! - **Cooperative Shutdown**: Every worker and collaborator observes one
//!   shared [`ShutdownSignal`](seedfarm_core::ShutdownSignal)
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedfarm_scanner::{MatchPolicy, ScanCoordinator, ScannerConfig};
//!
//! let config = ScannerConfig::new()
//!     .workers(8)
//!     .match_policy(MatchPolicy::StopOnMatch);
//! let coordinator = ScanCoordinator::new(config, generator, checker, notifier)?;
//!
//! let signal = ShutdownSignal::new();
//! let summary = coordinator.run(signal.clone()).await;
//! println!("{} attempts, {:.0}/s", summary.attempts, summary.rate());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod coordinator;
mod progress;

pub use config::{MatchPolicy, ScannerConfig};
pub use coordinator::{ScanCoordinator, ScanSummary};
pub use progress::{ProgressSnapshot, ScanProgress};
