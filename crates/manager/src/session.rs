// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The manager's accept loop and per-console-session command loop.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use sf_wire::parse_command;

use crate::context::Context;
use crate::dispatcher::dispatch;

/// Accept console connections until `ctx.shutdown` is triggered. Each
/// connection is handled on its own spawned task so one slow console does
/// not block others — bounded overall by `N + 1 + concurrent_consoles`
/// threads, since the dispatcher itself only ties up a blocking-pool
/// thread while enumerating/enqueuing.
pub async fn accept_loop(listener: TcpListener, ctx: Arc<Context>) {
    loop {
        tokio::select! {
            _ = ctx.shutdown.cancelled() => {
                info!("accept loop shutting down");
                return;
            }
            result = listener.accept() => {
                match result {
                    Ok((stream, addr)) => {
                        debug!(%addr, "console connected");
                        let ctx = Arc::clone(&ctx);
                        tokio::spawn(async move {
                            handle_session(stream, ctx).await;
                        });
                    }
                    Err(e) => warn!(error = %e, "accept failed"),
                }
            }
        }
    }
}

async fn handle_session(stream: TcpStream, ctx: Arc<Context>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        let line = tokio::select! {
            _ = ctx.shutdown.cancelled() => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("console session closed (EOF)");
                break;
            }
            Err(e) => {
                warn!(error = %e, "console read failed");
                break;
            }
        };

        let (reply, is_shutdown) = match parse_command(&line) {
            Ok(command) => {
                let is_shutdown = matches!(command, sf_wire::Command::Shutdown);
                (dispatch(command, &ctx).await, is_shutdown)
            }
            Err(e) => (sf_wire::Reply::Error { message: e.to_string() }, false),
        };

        if writer.write_all(format!("{reply}\n").as_bytes()).await.is_err() || is_shutdown {
            break;
        }
    }
}

/// Binds the console TCP listener.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(("0.0.0.0", port)).await
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
