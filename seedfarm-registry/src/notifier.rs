//! File notifier.
//!
//! Each found wallet is written to `<dir>/<address>.txt`:
//!
//! ```text
//! ETHAddress: 0x...
//! PrivateKey: ...
//! Mnemonic: word word ...
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::signal::ShutdownSignal;
use seedfarm_core::traits::MatchNotifier;
use seedfarm_core::types::{EthAddress, WalletCandidate};

/// Extension of record files
const RECORD_EXTENSION: &str = "txt";

/// Distinguishes temp files of concurrent writes to the same record
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Records found wallets as files in a directory.
///
/// Notifying the same address twice overwrites the same file. The record is
/// written even after shutdown was requested, so a match found during
/// teardown is not lost.
#[derive(Clone, Debug)]
pub struct FileNotifier {
    dir: PathBuf,
}

impl FileNotifier {
    /// Creates a notifier writing into `dir`. The directory is created on
    /// first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the record path for `address`.
    pub fn record_path(&self, address: &EthAddress) -> PathBuf {
        self.dir
            .join(format!("{}.{}", address.to_hex_string(), RECORD_EXTENSION))
    }

    async fn write_record(&self, path: &Path, record: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await?;

        // Write atomically (write to temp, then rename)
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let temp_path = path.with_extension(format!("{seq}.tmp"));
        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(record).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp record");
                }
            }
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl MatchNotifier for FileNotifier {
    async fn notify(&self, candidate: WalletCandidate, _signal: &ShutdownSignal) -> Result<()> {
        let address = EthAddress::from_hex(candidate.address())
            .map_err(|e| SeedfarmError::Notify(format!("unusable address: {e}")))?;
        let path = self.record_path(&address);

        info!(
            address = %candidate.address(),
            path = %path.display(),
            "wallet found"
        );

        let record = candidate.to_string();
        self.write_record(&path, record.as_bytes())
            .await
            .map_err(|e| SeedfarmError::Notify(format!("write {}: {e}", path.display())))
    }
}
