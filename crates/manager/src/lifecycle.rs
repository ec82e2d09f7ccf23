// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager process startup, config loading, and graceful shutdown.

use std::path::Path;
use std::sync::Arc;

use sf_core::{Registry, SystemClock};
use sf_queue::{JobQueue, WorkerPool};
use sf_transfer::TransferExecutor;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::cli::Args;
use crate::context::Context;
use crate::dispatcher::enumerate_and_enqueue;
use crate::session;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead { path: std::path::PathBuf, source: std::io::Error },

    #[error("bad config file {path}: {source}")]
    ConfigParse { path: std::path::PathBuf, source: sf_core::ConfigError },

    #[error("failed to bind console port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
}

/// Run the manager to completion: load config, start the worker pool and
/// accept loop, wait for a shutdown signal, then drain and exit.
///
/// Returns the process exit code: 0 on graceful shutdown, non-zero on a
/// fatal startup failure.
pub async fn run(args: Args) -> i32 {
    let _log_guard = match init_logging(&args.log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("sfmgr: failed to open log file {}: {e}", args.log_path.display());
            return 1;
        }
    };

    match run_inner(args).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "fatal startup failure");
            1
        }
    }
}

fn init_logging(log_path: &Path) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = log_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let filename = log_path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no file name")
    })?;

    let file_appender = tracing_appender::rolling::never(dir, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .event_format(sf_core::TransferLogFormat)
        .with_ansi(false)
        .init();

    Ok(guard)
}

async fn run_inner(args: Args) -> Result<(), StartupError> {
    let registry = Arc::new(Registry::new());
    let queue = Arc::new(JobQueue::new(args.queue_capacity as usize));
    let shutdown = CancellationToken::new();
    let ctx = Arc::new(Context::new(Arc::clone(&registry), Arc::clone(&queue), shutdown.clone()));

    load_config(&args.config_path, &ctx).await?;

    let executor = Arc::new(TransferExecutor::new(Arc::clone(&registry), SystemClock));
    let pool = WorkerPool::spawn(args.workers as usize, Arc::clone(&queue), executor);

    let listener = session::bind(args.port)
        .await
        .map_err(|source| StartupError::Bind { port: args.port, source })?;
    info!(port = args.port, workers = args.workers, queue_capacity = args.queue_capacity, "manager started");

    tokio::select! {
        _ = session::accept_loop(listener, Arc::clone(&ctx)) => {}
        _ = wait_for_signal() => {
            info!("received shutdown signal");
            queue.signal_shutdown();
            shutdown.cancel();
        }
    }

    info!("draining worker pool");
    let residual = pool.shutdown();
    if !residual.is_empty() {
        info!(dropped = residual.len(), "abandoned jobs still queued at shutdown");
    }

    info!("manager exiting");
    Ok(())
}

async fn load_config(path: &Path, ctx: &Context) -> Result<(), StartupError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::ConfigRead { path: path.to_path_buf(), source })?;
    let pairs = sf_core::parse_config(&contents)
        .map_err(|source| StartupError::ConfigParse { path: path.to_path_buf(), source })?;

    for pair in pairs {
        let source = pair.source.clone();
        let target = pair.target.clone();
        if let Err(e) = ctx.registry.add(pair) {
            error!(%source, error = %e, "startup config: failed to register pair");
            continue;
        }
        let ctx = ctx.clone();
        let result = tokio::task::spawn_blocking(move || enumerate_and_enqueue(&ctx, &source, &target))
            .await;
        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!(error = %e, "startup config: enumeration failed"),
            Err(e) => error!(error = %e, "startup config: enumeration task panicked"),
        }
    }
    Ok(())
}

/// Wait for either SIGTERM or Ctrl-C (SIGINT). Process-wide shutdown is a
/// single monotone edge: whichever fires first wins, there is no
/// "un-shutdown".
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        #[allow(clippy::expect_used)]
        // Only fails if the signal handler is already registered elsewhere
        // in the process; this is called exactly once at startup.
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
