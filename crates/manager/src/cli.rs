// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line argument parsing for `sfmgr`.

use std::path::PathBuf;

use clap::Parser;

/// Sync manager: owns the registry and worker pool, and accepts console
/// sessions on a TCP port.
#[derive(Parser, Debug)]
#[command(name = "sfmgr", version)]
pub struct Args {
    /// Path to the log file.
    #[arg(short = 'l', long = "log")]
    pub log_path: PathBuf,

    /// Path to the sync-pair config file, loaded at startup.
    #[arg(short = 'c', long = "config")]
    pub config_path: PathBuf,

    /// Number of worker threads.
    #[arg(short = 'n', long = "workers", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// TCP port to accept console sessions on.
    #[arg(short = 'p', long = "port")]
    pub port: u16,

    /// Bounded job queue capacity.
    #[arg(short = 'b', long = "queue-capacity", value_parser = clap::value_parser!(u32).range(1..))]
    pub queue_capacity: u32,
}
