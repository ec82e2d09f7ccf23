// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe registry of [`SyncPair`]s.
//!
//! Expected cardinality is tens of pairs, so a linear scan under one
//! exclusion is simpler and just as fast as a sorted structure would be;
//! the cost is dwarfed by network I/O on every job anyway.

use parking_lot::Mutex;
use thiserror::Error;

use crate::types::{PairKey, SyncPair};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate sync pair for {0}")]
    Duplicate(String),

    #[error("no sync pair registered for {0}")]
    NotFound(String),
}

#[derive(Default)]
struct Inner {
    pairs: Vec<SyncPair>,
}

impl Inner {
    fn position(&self, key: &PairKey) -> Option<usize> {
        self.pairs.iter().position(|p| p.key() == key)
    }
}

/// The set of active and deactivated [`SyncPair`]s known to the manager.
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner::default()) }
    }

    /// Insert a new pair, or reactivate an existing deactivated one with the
    /// same key. Rejects only if an *active* pair already owns the key.
    ///
    /// Reactivating a deactivated pair on `add` (rather than rejecting it as
    /// a duplicate) matches operator intent — `cancel` followed by `add` of
    /// the same source should resume replication, not require a different
    /// key.
    pub fn add(&self, pair: SyncPair) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock();
        match inner.position(pair.key()) {
            Some(idx) if inner.pairs[idx].active => {
                Err(RegistryError::Duplicate(pair.key().to_string()))
            }
            Some(idx) => {
                let existing = &mut inner.pairs[idx];
                existing.target = pair.target;
                existing.active = true;
                existing.error_count = 0;
                Ok(())
            }
            None => {
                inner.pairs.push(pair);
                Ok(())
            }
        }
    }

    /// Look up a pair by key and run `f` against it while holding the
    /// registry exclusion. This is the only way to observe a pair's
    /// contents: a raw reference could otherwise outlive a concurrent
    /// `remove`.
    pub fn with_pair<R>(&self, key: &PairKey, f: impl FnOnce(&SyncPair) -> R) -> Option<R> {
        let inner = self.inner.lock();
        inner.position(key).map(|idx| f(&inner.pairs[idx]))
    }

    pub fn deactivate(&self, key: &PairKey) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock();
        match inner.position(key) {
            Some(idx) => {
                inner.pairs[idx].active = false;
                Ok(())
            }
            None => Err(RegistryError::NotFound(key.to_string())),
        }
    }

    pub fn remove(&self, key: &PairKey) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock();
        match inner.position(key) {
            Some(idx) => {
                inner.pairs.remove(idx);
                Ok(())
            }
            None => Err(RegistryError::NotFound(key.to_string())),
        }
    }

    /// Record a completed job against its originating pair, if it is still
    /// registered. Removing or deactivating a pair does not affect jobs
    /// already in flight, so a miss here is not an error.
    pub fn record_success(&self, key: &PairKey, completed_at_epoch_ms: u64) {
        let mut inner = self.inner.lock();
        if let Some(idx) = inner.position(key) {
            inner.pairs[idx].last_sync_time = Some(completed_at_epoch_ms);
        }
    }

    pub fn record_error(&self, key: &PairKey) {
        let mut inner = self.inner.lock();
        if let Some(idx) = inner.position(key) {
            inner.pairs[idx].error_count += 1;
        }
    }

    pub fn count(&self) -> usize {
        self.inner.lock().pairs.len()
    }

    /// Snapshot of all pairs, for display (e.g. the console's `status`
    /// command).
    pub fn enumerate(&self) -> Vec<SyncPair> {
        self.inner.lock().pairs.clone()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
