// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure encode/decode logic for the LIST/PULL/PUSH wire protocol between a
//! transfer executor (or any client) and a file-server.
//!
//! This module does no I/O itself — it only frames and parses byte buffers.
//! `sf-transfer` drives actual sockets and calls into these functions.

use thiserror::Error;

/// Buffer size used by the transfer executor and file-server for each
/// PULL read / PUSH chunk. "Typical buffer size is a few KiB" per spec.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// The sentinel line terminating a LIST reply.
pub const LIST_SENTINEL: &str = ".";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("malformed PULL header: {0:?}")]
    MalformedPullHeader(String),

    #[error("source reported error: {0}")]
    SourceError(String),
}

pub fn list_request_line(dir: &str) -> String {
    format!("LIST {dir}\n")
}

pub fn pull_request_line(path: &str) -> String {
    format!("PULL {path}\n")
}

/// `"PUSH <path> -1\n"` — open for write, truncate.
pub fn push_open_line(path: &str) -> String {
    format!("PUSH {path} -1\n")
}

/// `"PUSH <path> <k> "` — header for a chunk of `k` raw bytes. Note the
/// trailing SPACE, not a newline: the payload follows immediately and the
/// receiver switches to a length-counted binary read after this header.
pub fn push_chunk_header(path: &str, k: usize) -> String {
    format!("PUSH {path} {k} ")
}

/// `"PUSH <path> 0\n"` — close.
pub fn push_close_line(path: &str) -> String {
    format!("PUSH {path} 0\n")
}

/// One filename entry from a LIST reply, already split off the sentinel.
pub struct ListReply {
    pub filenames: Vec<String>,
}

/// Attempt to parse a complete LIST reply out of everything read so far.
///
/// Returns `None` if the `".\n"` sentinel hasn't appeared yet in `buf` — the
/// caller must keep reading and accumulating, never capping at a single
/// fixed-size buffer, which would silently drop filenames past the
/// boundary.
pub fn try_parse_list_reply(buf: &str) -> Option<ListReply> {
    let mut filenames = Vec::new();
    for line in buf.split('\n') {
        if line == LIST_SENTINEL {
            return Some(ListReply { filenames });
        }
        if !line.is_empty() {
            filenames.push(line.to_string());
        }
    }
    None
}

/// The parsed leading `"<size> "` token of a PULL reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullHeader {
    /// Parsed decimal integer; negative means the source replied with an
    /// error message instead of a payload.
    pub size: i64,
    /// Byte offset, within the buffer the header was parsed from, of the
    /// first payload byte (or the first byte of the error message, when
    /// `size` is negative).
    pub header_len: usize,
}

/// Parse the leading `"<size> "` token from the start of a PULL reply
/// buffer.
///
/// Scans for the first SPACE byte; the bytes before it are the decimal
/// size, the byte after it is the first payload byte. Returns `Ok(None)`
/// if no SPACE has arrived yet (caller must read more before re-parsing,
/// since the first read may not include the whole header).
pub fn parse_pull_header(buf: &[u8]) -> Result<Option<PullHeader>, ProtocolError> {
    let Some(pos) = buf.iter().position(|&b| b == b' ') else {
        return Ok(None);
    };
    let digits = std::str::from_utf8(&buf[..pos])
        .map_err(|_| ProtocolError::MalformedPullHeader(format!("{:?}", &buf[..pos])))?;
    let size: i64 = digits
        .parse()
        .map_err(|_| ProtocolError::MalformedPullHeader(digits.to_string()))?;
    Ok(Some(PullHeader { size, header_len: pos + 1 }))
}

#[cfg(test)]
#[path = "transfer_protocol_tests.rs"]
mod tests;
