// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A bounded, blocking FIFO of [`SyncJob`]s shared between the accept/
//! dispatch side (producers) and the worker pool (consumers).
//!
//! Built on `parking_lot::Mutex` + two `Condvar`s rather than a channel:
//! callers need the queue's depth and shutdown state directly observable
//! under one lock, which a channel does not expose.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};
use sf_core::SyncJob;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is shutting down")]
    ShuttingDown,
}

struct Inner {
    items: VecDeque<SyncJob>,
    capacity: usize,
    shutdown: bool,
}

/// Bounded FIFO queue of [`SyncJob`]s.
pub struct JobQueue {
    inner: Mutex<Inner>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl JobQueue {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            inner: Mutex::new(Inner { items: VecDeque::new(), capacity, shutdown: false }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Block until there is room, then append `job` at the tail. Returns
    /// [`QueueError::ShuttingDown`] if shutdown was (or becomes) set before
    /// room was available — the job is returned to the caller, not
    /// dropped.
    pub fn enqueue(&self, job: SyncJob) -> Result<(), (SyncJob, QueueError)> {
        let mut inner = self.inner.lock();
        loop {
            if inner.shutdown {
                return Err((job, QueueError::ShuttingDown));
            }
            if inner.items.len() < inner.capacity {
                break;
            }
            self.not_full.wait(&mut inner);
        }
        inner.items.push_back(job);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Block until a job is available or the queue is shut down. Once
    /// `signal_shutdown` has been observed, returns `None` immediately and
    /// abandons whatever is still queued rather than continuing to hand it
    /// out — shutdown latency is bounded by the job a worker already holds,
    /// not by queue depth. Abandoned jobs are recovered by [`Self::drain`].
    pub fn dequeue(&self) -> Option<SyncJob> {
        let mut inner = self.inner.lock();
        loop {
            if inner.shutdown {
                return None;
            }
            if let Some(job) = inner.items.pop_front() {
                self.not_full.notify_one();
                return Some(job);
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Set the shutdown flag and wake every blocked producer and consumer.
    /// Monotone: calling this more than once is a no-op.
    pub fn signal_shutdown(&self) {
        let mut inner = self.inner.lock();
        inner.shutdown = true;
        drop(inner);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Drain and drop whatever is left in the queue. Called once every
    /// worker has exited, so nothing races the drain.
    pub fn drain(&self) -> Vec<SyncJob> {
        let mut inner = self.inner.lock();
        inner.items.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "job_queue_tests.rs"]
mod tests;
