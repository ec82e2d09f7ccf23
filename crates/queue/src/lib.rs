// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bounded job queue and worker pool that sit between the manager's
//! accept/dispatch loop and the blocking transfer executor.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod job_queue;
pub mod worker_pool;

pub use job_queue::{JobQueue, QueueError};
pub use worker_pool::{JobExecutor, WorkerPool};
