// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line argument parsing for `sfc`.

use std::path::PathBuf;

use clap::Parser;

/// Interactive console: opens one session to a manager and forwards
/// commands typed on standard input.
#[derive(Parser, Debug)]
#[command(name = "sfc", version)]
pub struct Args {
    /// Path to the log file.
    #[arg(short = 'l', long = "log")]
    pub log_path: PathBuf,

    /// Manager host to connect to.
    #[arg(short = 'h', long = "host")]
    pub host: String,

    /// Manager port to connect to.
    #[arg(short = 'p', long = "port")]
    pub port: u16,
}
