// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state handed to every console session and the dispatcher.

use std::sync::Arc;

use sf_core::Registry;
use sf_queue::JobQueue;
use tokio_util::sync::CancellationToken;

/// Everything a console session's command dispatch needs. Cheap to clone
/// (every field is an `Arc` or a `CancellationToken`, itself an `Arc`
/// internally).
#[derive(Clone)]
pub struct Context {
    pub registry: Arc<Registry>,
    pub queue: Arc<JobQueue>,
    pub shutdown: CancellationToken,
}

impl Context {
    pub fn new(registry: Arc<Registry>, queue: Arc<JobQueue>, shutdown: CancellationToken) -> Self {
        Self { registry, queue, shutdown }
    }
}
