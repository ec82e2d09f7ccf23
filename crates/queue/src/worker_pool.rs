// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A fixed-size pool of OS threads draining a [`JobQueue`].
//!
//! Each worker loops `dequeue -> execute -> loop`, blocking on the queue
//! between jobs. `WorkerPool::shutdown` signals the queue closed, joins
//! every worker, and returns whatever was left queued so the caller can log
//! or report it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use sf_core::SyncJob;

use crate::job_queue::JobQueue;

/// Executes a single [`SyncJob`]. Implemented by the transfer crate;
/// kept as a trait seam here so the queue crate does not depend on it.
pub trait JobExecutor: Send + Sync {
    fn execute(&self, job: &SyncJob);
}

/// A pool of blocking worker threads consuming from a shared [`JobQueue`].
pub struct WorkerPool {
    queue: Arc<JobQueue>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `worker_count` threads, each pulling from `queue` and handing
    /// jobs to `executor`.
    pub fn spawn<E>(worker_count: usize, queue: Arc<JobQueue>, executor: Arc<E>) -> Self
    where
        E: JobExecutor + 'static,
    {
        assert!(worker_count > 0, "worker pool needs at least one worker");

        let handles = (0..worker_count)
            .map(|id| {
                let queue = Arc::clone(&queue);
                let executor = Arc::clone(&executor);
                #[allow(clippy::expect_used)]
                // Spawning an OS thread can only fail when resources are
                // exhausted; there is no meaningful recovery, so the pool
                // cannot start without every worker thread in place.
                thread::Builder::new()
                    .name(format!("sf-worker-{id}"))
                    .spawn(move || Self::run(id, queue, executor))
                    .expect("failed to spawn worker thread")
            })
            .collect();

        Self { queue, handles }
    }

    fn run<E: JobExecutor>(id: usize, queue: Arc<JobQueue>, executor: Arc<E>) {
        tracing::debug!(worker_id = id, "worker started");
        while let Some(job) = queue.dequeue() {
            executor.execute(&job);
        }
        tracing::debug!(worker_id = id, "worker exiting");
    }

    /// Signal shutdown, block until every worker finishes whatever job it
    /// currently holds and exits, and return whatever jobs were still
    /// queued (and thus abandoned) when shutdown was signalled.
    pub fn shutdown(self) -> Vec<SyncJob> {
        self.queue.signal_shutdown();
        for handle in self.handles {
            let _ = handle.join();
        }
        self.queue.drain()
    }

    pub fn queue(&self) -> &Arc<JobQueue> {
        &self.queue
    }
}

#[cfg(test)]
#[path = "worker_pool_tests.rs"]
mod tests;
