// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `execute(job)`: moves one file from its source file-server to its target
//! file-server over two fresh TCP connections (LIST/PULL on the source,
//! PUSH on the target).

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use sf_core::{Clock, LogResult, Op, Registry, SyncJob, SystemClock};
use sf_queue::JobExecutor;
use sf_wire::{parse_pull_header, pull_request_line, push_chunk_header, push_close_line, push_open_line, CHUNK_SIZE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("connect to source failed: {0}")]
    SourceConnect(std::io::Error),

    #[error("connect to target failed: {0}")]
    TargetConnect(std::io::Error),

    #[error("source replied with error: {0}")]
    SourceError(String),

    #[error("malformed PULL header from source")]
    MalformedHeader,

    #[error("short read from source: expected {expected} bytes, got {got}")]
    ShortRead { expected: i64, got: i64 },

    #[error("socket I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Size of the buffer used for every read from a source connection; also
/// the maximum size of a single PUSH chunk.
const DEFAULT_BUFFER_SIZE: usize = CHUNK_SIZE;

/// Implements [`JobExecutor`], driving one [`SyncJob`] end to end and
/// recording its outcome against the originating [`Registry`] entry.
pub struct TransferExecutor<C: Clock = SystemClock> {
    registry: Arc<Registry>,
    clock: C,
    buffer_size: usize,
}

impl<C: Clock> TransferExecutor<C> {
    pub fn new(registry: Arc<Registry>, clock: C) -> Self {
        Self { registry, clock, buffer_size: DEFAULT_BUFFER_SIZE }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Move one file from `job.source` to `job.target`. Never panics on a
    /// peer or I/O failure — every error path is logged and returned so the
    /// caller can update the registry's error counter.
    pub fn transfer(&self, job: &SyncJob) -> Result<u64, TransferError> {
        let src_label = job.source.to_string();
        let dst_label = job.target.to_string();

        let mut source = TcpStream::connect((job.source.endpoint.host.as_str(), job.source.endpoint.port))
            .map_err(|e| {
                sf_core::transfer_event(&src_label, &dst_label, Op::Pull, LogResult::Error, &e.to_string());
                TransferError::SourceConnect(e)
            })?;

        let mut target = TcpStream::connect((job.target.endpoint.host.as_str(), job.target.endpoint.port))
            .map_err(|e| {
                sf_core::transfer_event(&src_label, &dst_label, Op::Push, LogResult::Error, &e.to_string());
                TransferError::TargetConnect(e)
            })?;

        match self.run_transfer(job, &mut source, &mut target) {
            Ok(bytes) => {
                sf_core::transfer_event(
                    &src_label,
                    &dst_label,
                    Op::Pull,
                    LogResult::Success,
                    &format!("{bytes} bytes"),
                );
                sf_core::transfer_event(
                    &src_label,
                    &dst_label,
                    Op::Push,
                    LogResult::Success,
                    &format!("{bytes} bytes"),
                );
                Ok(bytes)
            }
            Err(e) => {
                sf_core::transfer_event(&src_label, &dst_label, Op::Pull, LogResult::Error, &e.to_string());
                Err(e)
            }
        }
    }

    fn run_transfer(
        &self,
        job: &SyncJob,
        source: &mut TcpStream,
        target: &mut TcpStream,
    ) -> Result<u64, TransferError> {
        source.write_all(pull_request_line(&job.source_path()).as_bytes())?;

        let mut buf = vec![0u8; self.buffer_size];
        let mut accumulated: Vec<u8> = Vec::new();
        let (size, mut payload_in_first_read) = loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                return Err(TransferError::MalformedHeader);
            }
            accumulated.extend_from_slice(&buf[..n]);
            match parse_pull_header(&accumulated) {
                Ok(Some(header)) => {
                    let payload_start = accumulated[header.header_len..].to_vec();
                    break (header.size, payload_start);
                }
                Ok(None) => continue,
                Err(_) => return Err(TransferError::MalformedHeader),
            }
        };

        if size < 0 {
            let message = String::from_utf8_lossy(&payload_in_first_read).trim().to_string();
            return Err(TransferError::SourceError(message));
        }
        let size = size as u64;

        target.write_all(push_open_line(&job.target_path()).as_bytes())?;

        let mut forwarded: u64 = 0;
        loop {
            if !payload_in_first_read.is_empty() {
                let chunk = std::mem::take(&mut payload_in_first_read);
                self.forward_chunk(target, job, &chunk)?;
                forwarded += chunk.len() as u64;
            }
            if forwarded >= size {
                break;
            }
            let remaining = (size - forwarded) as usize;
            let want = remaining.min(self.buffer_size);
            let n = source.read(&mut buf[..want])?;
            if n == 0 {
                return Err(TransferError::ShortRead { expected: size as i64, got: forwarded as i64 });
            }
            self.forward_chunk(target, job, &buf[..n])?;
            forwarded += n as u64;
        }

        target.write_all(push_close_line(&job.target_path()).as_bytes())?;

        let completed_at = self.clock.epoch_ms();
        self.registry.record_success(&job.source, completed_at);

        Ok(forwarded)
    }

    fn forward_chunk(&self, target: &mut TcpStream, job: &SyncJob, chunk: &[u8]) -> Result<(), TransferError> {
        if chunk.is_empty() {
            return Ok(());
        }
        target.write_all(push_chunk_header(&job.target_path(), chunk.len()).as_bytes())?;
        target.write_all(chunk)?;
        Ok(())
    }
}

impl<C: Clock> JobExecutor for TransferExecutor<C> {
    fn execute(&self, job: &SyncJob) {
        if self.transfer(job).is_err() {
            self.registry.record_error(&job.source);
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
