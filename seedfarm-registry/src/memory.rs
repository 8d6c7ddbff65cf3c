//! In-memory address set.
//!
//! Fast, thread-safe storage suitable for tests, small target lists and as
//! the backing store of [`FileAddressSet`](crate::FileAddressSet).

use async_trait::async_trait;
use dashmap::DashSet;

use seedfarm_core::error::Result;
use seedfarm_core::signal::ShutdownSignal;
use seedfarm_core::traits::ExistenceChecker;
use seedfarm_core::types::normalize_address;

/// In-memory set of canonical addresses.
///
/// Every address is normalized on insert and on lookup.
///
/// # Thread Safety
///
/// All operations are thread-safe and can be called concurrently.
#[derive(Debug, Default)]
pub struct MemoryAddressSet {
    addresses: DashSet<String>,
}

impl MemoryAddressSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            addresses: DashSet::with_capacity(capacity),
        }
    }

    /// Adds an address. Returns false if it was already present.
    pub fn insert(&self, address: &str) -> bool {
        self.addresses.insert(normalize_address(address))
    }

    /// Removes an address. Returns true if it was present.
    pub fn remove(&self, address: &str) -> bool {
        self.addresses.remove(&normalize_address(address)).is_some()
    }

    /// Returns true if the address is in the set.
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&normalize_address(address))
    }

    /// Adds every address from `addresses`.
    pub fn extend<I, S>(&self, addresses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for address in addresses {
            self.insert(address.as_ref());
        }
    }

    /// Removes all addresses.
    pub fn clear(&self) {
        self.addresses.clear();
    }

    /// Returns the number of addresses.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MemoryAddressSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set = Self::new();
        set.extend(iter);
        set
    }
}

#[async_trait]
impl ExistenceChecker for MemoryAddressSet {
    async fn exists(&self, address: &str, signal: &ShutdownSignal) -> Result<bool> {
        signal.check()?;
        Ok(self.contains(address))
    }
}
