//! libSQL / Turso backed address set.
//!
//! Expects a table holding canonical addresses:
//!
//! ```sql
//! CREATE TABLE wallets (address TEXT PRIMARY KEY);
//! ```

use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use tracing::{debug, info, instrument};

use seedfarm_core::error::{Result, SeedfarmError};
use seedfarm_core::signal::ShutdownSignal;
use seedfarm_core::traits::ExistenceChecker;
use seedfarm_core::types::normalize_address;

/// Point lookup against the `wallets` table. Stored rows may carry
/// checksummed (mixed-case) hex, so the comparison ignores case.
const EXISTS_QUERY: &str = "SELECT 1 FROM wallets WHERE address = ?1 COLLATE NOCASE LIMIT 1";

/// Address set stored in a libSQL database.
///
/// Lookups are raced against the shutdown signal, so a pending query fails
/// fast with [`SeedfarmError::Cancelled`] once shutdown is requested.
pub struct SqlAddressSet {
    conn: Connection,
    /// Kept alive for the lifetime of the connection
    _db: Option<Database>,
}

impl SqlAddressSet {
    /// Connects to a remote Turso / libSQL database.
    #[instrument(skip(auth_token))]
    pub async fn connect(url: &str, auth_token: &str) -> Result<Self> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(check_error)?;
        let conn = db.connect().map_err(check_error)?;
        info!("Connected to address database");

        Ok(Self {
            conn,
            _db: Some(db),
        })
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, _db: None }
    }

    async fn lookup(&self, address: &str) -> Result<bool> {
        let mut rows = self
            .conn
            .query(EXISTS_QUERY, [address])
            .await
            .map_err(check_error)?;
        let found = rows.next().await.map_err(check_error)?.is_some();
        debug!(address, found, "Address lookup");
        Ok(found)
    }
}

fn check_error(e: libsql::Error) -> SeedfarmError {
    SeedfarmError::Check(format!("libsql: {e}"))
}

#[async_trait]
impl ExistenceChecker for SqlAddressSet {
    async fn exists(&self, address: &str, signal: &ShutdownSignal) -> Result<bool> {
        signal.check()?;
        let address = normalize_address(address);

        tokio::select! {
            biased;
            _ = signal.cancelled() => Err(SeedfarmError::Cancelled),
            found = self.lookup(&address) => found,
        }
    }
}
