// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use sf_manager::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    std::process::exit(sf_manager::run(args).await);
}
