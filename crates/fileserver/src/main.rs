// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sfs` - file-server process: accepts connections and serves the
//! LIST/PULL/PUSH command loop against the current working directory.

use std::net::TcpListener;
use std::thread;

use clap::Parser;

/// File-server: listens on a TCP port and serves directories under the
/// current working directory.
#[derive(Parser)]
#[command(name = "sfs", version)]
struct Args {
    /// TCP port to listen on.
    #[arg(short = 'p', long = "port")]
    port: u16,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let listener = match TcpListener::bind(("0.0.0.0", args.port)) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("sfs: failed to bind port {}: {e}", args.port);
            std::process::exit(1);
        }
    };

    tracing::info!(port = args.port, "file-server listening");

    for incoming in listener.incoming() {
        match incoming {
            Ok(stream) => {
                thread::spawn(move || sf_transfer::serve(stream));
            }
            Err(e) => tracing::warn!(error = %e, "accept failed"),
        }
    }
}
