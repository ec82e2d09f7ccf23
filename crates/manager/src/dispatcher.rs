// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translates one parsed [`Command`] into a registry/queue mutation and a
//! [`Reply`].
//!
//! `add` against a large directory blocks the calling console session for
//! as long as it takes to enumerate the source and enqueue every file —
//! the queue's bounded capacity is the intended backpressure, so enumerate
//! and enqueue run on a blocking thread rather than stalling the whole
//! runtime.

use sf_core::{RegistryError, SyncJob, SyncPair};
use sf_queue::QueueError;
use sf_wire::{Command, Reply};

use crate::context::Context;

pub async fn dispatch(command: Command, ctx: &Context) -> Reply {
    match command {
        Command::Add { source, target } => handle_add(ctx.clone(), source, target).await,
        Command::Cancel { source } => handle_cancel(ctx, source),
        Command::Status => handle_status(ctx),
        Command::Shutdown => handle_shutdown(ctx),
    }
}

async fn handle_add(ctx: Context, source: sf_core::DirSpec, target: sf_core::DirSpec) -> Reply {
    let pair = SyncPair::new(source.clone(), target.clone());
    if let Err(RegistryError::Duplicate(_)) = ctx.registry.add(pair) {
        return Reply::AlreadyInQueue { source };
    }

    let result = tokio::task::spawn_blocking(move || enumerate_and_enqueue(&ctx, &source, &target))
        .await
        .unwrap_or_else(|e| Err(format!("enumeration task panicked: {e}")));

    match result {
        Ok((source, target)) => Reply::Added { source, target },
        Err(message) => Reply::Error { message },
    }
}

/// Runs on a blocking thread: LIST the source, then enqueue one job per
/// filename. Stops early and reports shutdown if the queue closes
/// mid-enqueue.
pub(crate) fn enumerate_and_enqueue(
    ctx: &Context,
    source: &sf_core::DirSpec,
    target: &sf_core::DirSpec,
) -> Result<(sf_core::DirSpec, sf_core::DirSpec), String> {
    let filenames = sf_transfer::list_source_directory(source).map_err(|e| e.to_string())?;

    for filename in filenames {
        let job = SyncJob { source: source.clone(), target: target.clone(), filename };
        if let Err((_, QueueError::ShuttingDown)) = ctx.queue.enqueue(job) {
            return Err("shutting down".to_string());
        }
    }

    Ok((source.clone(), target.clone()))
}

fn handle_cancel(ctx: &Context, source: sf_core::DirSpec) -> Reply {
    match ctx.registry.deactivate(&source) {
        Ok(()) => Reply::SyncStopped { source },
        Err(RegistryError::NotFound(_)) => Reply::NotSynced { source },
        Err(other) => Reply::Error { message: other.to_string() },
    }
}

fn handle_status(ctx: &Context) -> Reply {
    let lines = ctx
        .registry
        .enumerate()
        .into_iter()
        .map(|pair| {
            format!(
                "{} -> {} active={} errors={} last_sync={}",
                pair.source,
                pair.target,
                pair.active,
                pair.error_count,
                pair.last_sync_time.map(|t| t.to_string()).unwrap_or_else(|| "never".to_string()),
            )
        })
        .collect();
    Reply::Status { lines }
}

fn handle_shutdown(ctx: &Context) -> Reply {
    ctx.queue.signal_shutdown();
    ctx.shutdown.cancel();
    Reply::ShuttingDown
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
