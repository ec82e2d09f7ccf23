// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value types shared by every sync-fleet component: endpoints, sync pairs,
//! and the per-file jobs a pair expands into.

use std::fmt;

/// A host/port pair identifying a file-server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A directory on a file-server: `<dir>@<host>:<port>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirSpec {
    pub dir: String,
    pub endpoint: Endpoint,
}

impl DirSpec {
    pub fn new(dir: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            dir: dir.into(),
            endpoint: Endpoint { host: host.into(), port },
        }
    }
}

impl fmt::Display for DirSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.dir, self.endpoint)
    }
}

/// The unique, immutable key of a [`SyncPair`]: its source directory.
pub type PairKey = DirSpec;

/// An active or deactivated replication configuration.
///
/// Immutable key `(source_host, source_port, source_dir)`; everything else
/// is mutable bookkeeping updated as jobs for this pair run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    pub source: DirSpec,
    pub target: DirSpec,
    pub active: bool,
    /// Epoch milliseconds of the last job completion for this pair, if any.
    pub last_sync_time: Option<u64>,
    /// Monotonically increasing count of per-job failures seen by this pair.
    pub error_count: u64,
}

impl SyncPair {
    pub fn new(source: DirSpec, target: DirSpec) -> Self {
        Self {
            source,
            target,
            active: true,
            last_sync_time: None,
            error_count: 0,
        }
    }

    pub fn key(&self) -> &PairKey {
        &self.source
    }
}

/// One file to copy, snapshotted from a [`SyncPair`] at LIST-enumeration
/// time.
///
/// Carries its own copies of the endpoint strings: deactivating the
/// originating `SyncPair` after a job is enqueued does not affect the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub source: DirSpec,
    pub target: DirSpec,
    pub filename: String,
}

impl SyncJob {
    pub fn from_pair(pair: &SyncPair, filename: impl Into<String>) -> Self {
        Self {
            source: pair.source.clone(),
            target: pair.target.clone(),
            filename: filename.into(),
        }
    }

    /// Full remote path of the source file, `<dir>/<filename>`.
    pub fn source_path(&self) -> String {
        format!("{}/{}", self.source.dir, self.filename)
    }

    /// Full remote path of the target file, `<dir>/<filename>`.
    pub fn target_path(&self) -> String {
        format!("{}/{}", self.target.dir, self.filename)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
