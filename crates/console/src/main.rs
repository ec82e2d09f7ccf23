// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use clap::Parser;
use sf_console::{session, Args};
use tracing_appender::non_blocking::WorkerGuard;

fn init_logging(log_path: &Path) -> std::io::Result<WorkerGuard> {
    let dir = log_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let filename = log_path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no file name")
    })?;

    let file_appender = tracing_appender::rolling::never(dir, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt().with_writer(non_blocking).with_ansi(false).init();
    Ok(guard)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = match init_logging(&args.log_path) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("sfc: failed to open log file {}: {e}", args.log_path.display());
            std::process::exit(1);
        }
    };

    let stream = match tokio::net::TcpStream::connect((args.host.as_str(), args.port)).await {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("sfc: failed to connect to {}:{}: {e}", args.host, args.port);
            std::process::exit(1);
        }
    };

    match session::run(stream, tokio::io::stdin()).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("sfc: session error: {e}");
            std::process::exit(1);
        }
    }
}
