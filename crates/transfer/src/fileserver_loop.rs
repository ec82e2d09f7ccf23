// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The file-server side of the wire protocol: one thread per accepted
//! connection, running a half-duplex LIST/PULL/PUSH command loop against
//! the local filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileServerError {
    #[error("connection closed")]
    Closed,

    #[error("malformed command line: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Per-connection state. A retained file descriptor for an in-progress PUSH
/// lives here, not in any shared/global place, so two concurrent
/// connections can never collide on it.
struct Session {
    push_file: Option<File>,
}

/// Strip a single leading `/` so wire paths resolve under the file-server's
/// working directory — the whole access-control model is "there is none".
fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Serve one accepted connection until EOF or an unrecoverable I/O error.
/// Per-command errors (bad path, missing file) are reported to the peer and
/// do not end the connection.
pub fn serve(stream: TcpStream) {
    let peer = stream.peer_addr().map(|a| a.to_string()).unwrap_or_else(|_| "?".to_string());
    if let Err(e) = serve_inner(stream) {
        match e {
            FileServerError::Closed => tracing::debug!(peer, "connection closed"),
            other => tracing::warn!(peer, error = %other, "connection ended with error"),
        }
    }
}

fn serve_inner(stream: TcpStream) -> Result<(), FileServerError> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let mut session = Session { push_file: None };

    loop {
        let verb = match read_token(&mut reader)? {
            Some(token) => token,
            None => return Ok(()),
        };

        match verb.as_str() {
            "LIST" => {
                let dir = read_token(&mut reader)?.ok_or(FileServerError::Closed)?;
                handle_list(&mut writer, &dir)?;
            }
            "PULL" => {
                let path = read_token(&mut reader)?.ok_or(FileServerError::Closed)?;
                handle_pull(&mut writer, &path)?;
            }
            "PUSH" => {
                let path = read_token(&mut reader)?.ok_or(FileServerError::Closed)?;
                let k_token = read_token(&mut reader)?.ok_or(FileServerError::Closed)?;
                let k: i64 = k_token
                    .parse()
                    .map_err(|_| FileServerError::Malformed(format!("bad PUSH length {k_token:?}")))?;
                handle_push(&mut reader, &mut session, &path, k)?;
            }
            other => return Err(FileServerError::Malformed(format!("unknown verb {other:?}"))),
        }
    }
}

/// Read one whitespace- or newline-delimited token, consuming the
/// delimiter. Returns `Ok(None)` on clean EOF before any bytes were read.
fn read_token(reader: &mut BufReader<TcpStream>) -> Result<Option<String>, FileServerError> {
    let mut token = Vec::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return if token.is_empty() { Ok(None) } else { Err(FileServerError::Closed) };
        }
        if let Some(pos) = buf.iter().position(|&b| b == b' ' || b == b'\n') {
            token.extend_from_slice(&buf[..pos]);
            reader.consume(pos + 1);
            return Ok(Some(String::from_utf8_lossy(&token).into_owned()));
        }
        let n = buf.len();
        token.extend_from_slice(buf);
        reader.consume(n);
    }
}

fn handle_list(writer: &mut TcpStream, dir: &str) -> Result<(), FileServerError> {
    let dir = strip_leading_slash(dir);
    match list_regular_files(Path::new(dir)) {
        Ok(names) => {
            for name in names {
                writer.write_all(format!("{name}\n").as_bytes())?;
            }
        }
        Err(e) => {
            tracing::warn!(dir, error = %e, "LIST failed to read directory");
        }
    }
    writer.write_all(b".\n")?;
    Ok(())
}

fn list_regular_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.metadata()?.is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn handle_pull(writer: &mut TcpStream, path: &str) -> Result<(), FileServerError> {
    let path = strip_leading_slash(path);
    match fs::read(path) {
        Ok(bytes) => {
            writer.write_all(format!("{} ", bytes.len()).as_bytes())?;
            writer.write_all(&bytes)?;
        }
        Err(e) => {
            writer.write_all(format!("-1 {e}\n").as_bytes())?;
        }
    }
    Ok(())
}

fn handle_push(
    reader: &mut BufReader<TcpStream>,
    session: &mut Session,
    path: &str,
    k: i64,
) -> Result<(), FileServerError> {
    let path = strip_leading_slash(path);

    match k {
        -1 => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(ensure_parent(path)?)?;
            session.push_file = Some(file);
        }
        0 => {
            session.push_file = None;
        }
        k if k > 0 => {
            let mut remaining = k as u64;
            let mut buf = [0u8; 8192];
            let file = session
                .push_file
                .as_mut()
                .ok_or_else(|| FileServerError::Malformed("PUSH chunk with no open file".into()))?;
            while remaining > 0 {
                let want = remaining.min(buf.len() as u64) as usize;
                let n = reader.read(&mut buf[..want])?;
                if n == 0 {
                    return Err(FileServerError::Closed);
                }
                file.write_all(&buf[..n])?;
                remaining -= n as u64;
            }
        }
        negative => {
            return Err(FileServerError::Malformed(format!("negative PUSH length {negative}")));
        }
    }
    Ok(())
}

fn ensure_parent(path: &str) -> io::Result<PathBuf> {
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

#[cfg(test)]
#[path = "fileserver_loop_tests.rs"]
mod tests;
