// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One console session: forward lines read from standard input to the
//! manager, print and log whatever comes back.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::info;

const REPLY_BUFFER_SIZE: usize = 8192;

/// Run the interactive loop until standard input reaches EOF or the
/// connection is lost. Each request gets exactly one reply read, which may
/// itself span several lines (e.g. `status`) — the manager writes the
/// whole reply in one `write_all`, so one `read` call is enough to collect
/// it in the common case.
pub async fn run(mut stream: TcpStream, input: impl AsyncRead + Unpin) -> io::Result<()> {
    let mut lines = BufReader::new(input).lines();
    let mut reply_buf = vec![0u8; REPLY_BUFFER_SIZE];

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        stream.write_all(line.as_bytes()).await?;
        stream.write_all(b"\n").await?;

        let n = stream.read(&mut reply_buf).await?;
        if n == 0 {
            println!("connection closed by manager");
            break;
        }

        let reply = String::from_utf8_lossy(&reply_buf[..n]);
        let reply = reply.trim_end();
        println!("{reply}");
        info!(reply, "console received reply");

        if line.trim() == "shutdown" {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
