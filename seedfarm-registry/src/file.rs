//! File-backed address set.
//!
//! Loads a plain-text list into memory and answers lookups from there.
//!
//! # File Format
//!
//! ```text
//! # comment lines and blank lines are ignored
//! 0x9858EfFD232B4033E47d90003D41EC34EcaEda94
//! 9858effd232b4033e47d90003d41ec34ecaeda94
//! ```
//!
//! One address per line, with or without `0x`, in any case.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::fs;
use tracing::{info, instrument, warn};

use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::signal::ShutdownSignal;
use seedfarm_core::traits::ExistenceChecker;
use seedfarm_core::types::EthAddress;

use crate::MemoryAddressSet;

/// Comment prefix in address list files
const COMMENT_PREFIX: char = '#';

/// Address set loaded from a newline-separated file.
pub struct FileAddressSet {
    /// Path to the address list
    path: PathBuf,
    /// Loaded addresses; replaced wholesale on reload
    set: RwLock<MemoryAddressSet>,
}

impl FileAddressSet {
    /// Loads the address list at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let set = Self::read_list(&path).await?;

        Ok(Self {
            path,
            set: RwLock::new(set),
        })
    }

    /// Re-reads the file and swaps in the new contents.
    ///
    /// Returns the number of addresses loaded. On error the previous
    /// contents stay in place.
    pub async fn reload(&self) -> Result<usize> {
        let fresh = Self::read_list(&self.path).await?;
        let count = fresh.len();
        *self.set.write() = fresh;
        Ok(count)
    }

    #[instrument]
    async fn read_list(path: &Path) -> Result<MemoryAddressSet> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            SeedfarmError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read address list {}: {}", path.display(), e),
            ))
        })?;

        let set = MemoryAddressSet::new();
        let mut skipped = 0usize;

        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            match EthAddress::from_hex(line) {
                Ok(address) => {
                    set.insert(&address.canonical());
                }
                Err(e) => {
                    skipped += 1;
                    warn!(line = number + 1, error = %e, "Skipping invalid address");
                }
            }
        }

        info!(count = set.len(), skipped, "Loaded address list");
        Ok(set)
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of loaded addresses.
    pub fn len(&self) -> usize {
        self.set.read().len()
    }

    /// Returns true if no addresses are loaded.
    pub fn is_empty(&self) -> bool {
        self.set.read().is_empty()
    }

    /// Returns true if the address is loaded.
    pub fn contains(&self, address: &str) -> bool {
        self.set.read().contains(address)
    }
}

#[async_trait]
impl ExistenceChecker for FileAddressSet {
    async fn exists(&self, address: &str, signal: &ShutdownSignal) -> Result<bool> {
        signal.check()?;
        Ok(self.contains(address))
    }
}
