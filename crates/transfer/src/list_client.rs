// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side LIST: used by the command dispatcher to enumerate a source
//! directory's files when a new sync pair is added.

use std::io::{Read, Write};
use std::net::TcpStream;

use sf_core::DirSpec;
use sf_wire::{list_request_line, try_parse_list_reply};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("connect to source failed: {0}")]
    Connect(std::io::Error),

    #[error("socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("source reply was not valid UTF-8")]
    InvalidEncoding,
}

/// Open a connection to `source.endpoint`, send `LIST <source.dir>`, and
/// accumulate reads until the `.\n` sentinel — never capping at a single
/// fixed-size buffer, so a large directory listing is never truncated.
pub fn list_source_directory(source: &DirSpec) -> Result<Vec<String>, ListError> {
    let mut stream = TcpStream::connect((source.endpoint.host.as_str(), source.endpoint.port))
        .map_err(ListError::Connect)?;
    stream.write_all(list_request_line(&source.dir).as_bytes())?;

    let mut accumulated = String::new();
    let mut buf = [0u8; 4096];
    loop {
        if let Some(reply) = try_parse_list_reply(&accumulated) {
            return Ok(reply.filenames);
        }
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Err(ListError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "source closed connection before LIST sentinel",
            )));
        }
        let chunk = std::str::from_utf8(&buf[..n]).map_err(|_| ListError::InvalidEncoding)?;
        accumulated.push_str(chunk);
    }
}

#[cfg(test)]
#[path = "list_client_tests.rs"]
mod tests;
