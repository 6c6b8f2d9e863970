//! In-memory hash store.
//!
//! [`InMemoryHashStore`] keeps every entry in a `Vec` indexed by key, behind a
//! `RwLock`. Keys are dense, so the vector length doubles as the next-key
//! counter and allocation is a single push under the write lock.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pwhash_types::{EntryState, HashKey};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{HashStore, Lookup};

/// An in-memory implementation of [`HashStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryHashStore {
    entries: RwLock<Vec<EntryState>>,
}

impl InMemoryHashStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<EntryState>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<EntryState>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl HashStore for InMemoryHashStore {
    fn allocate(&self) -> StoreResult<HashKey> {
        let mut entries = self.write()?;
        let key = HashKey::new(entries.len() as u64);
        entries.push(EntryState::Pending);
        debug!(%key, "allocated key");
        Ok(key)
    }

    fn complete(&self, key: HashKey, digest: String) -> StoreResult<()> {
        let mut entries = self.write()?;
        let slot = usize::try_from(key.get())
            .ok()
            .and_then(|idx| entries.get_mut(idx))
            .ok_or(StoreError::NotAllocated(key))?;
        if slot.is_ready() {
            return Err(StoreError::AlreadyComplete(key));
        }
        *slot = EntryState::Ready(digest);
        debug!(%key, "completed key");
        Ok(())
    }

    fn lookup(&self, key: i64) -> StoreResult<Lookup> {
        let Some(key) = HashKey::from_signed(key) else {
            return Ok(Lookup::NotFound);
        };
        let entries = self.read()?;
        let entry = usize::try_from(key.get())
            .ok()
            .and_then(|idx| entries.get(idx));
        Ok(match entry {
            None => Lookup::NotFound,
            Some(EntryState::Pending) => Lookup::Pending,
            Some(EntryState::Ready(d)) => Lookup::Ready(d.clone()),
        })
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}
