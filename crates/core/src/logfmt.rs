// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom `tracing` event formatter rendering one line per transfer event:
//!
//! `[timestamp] [src_dir@src_host:src_port] [dst_dir@dst_host:dst_port] [thread_id] [op] [result] [details]`
//!
//! Every call site logs through [`crate::logfmt::transfer_event`] (or the
//! raw `tracing::info!`/`error!` macros with the `src`, `dst`, `op`,
//! `result`, `details` fields) so the fields this formatter expects are
//! always present. `tracing_appender`'s non-blocking writer serializes the
//! actual file writes, so each formatted line lands with a single flushed
//! write call and interleaving stays at line granularity.

use std::fmt;

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;

/// The two wire-protocol verbs a transfer log line can report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Pull,
    Push,
}

crate::simple_display! {
    Op {
        Pull => "PULL",
        Push => "PUSH",
    }
}

/// The outcome of a logged operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogResult {
    Success,
    Error,
}

crate::simple_display! {
    LogResult {
        Success => "SUCCESS",
        Error => "ERROR",
    }
}

#[derive(Default)]
struct Fields {
    src: String,
    dst: String,
    op: String,
    result: String,
    details: String,
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "src" => self.src = value.to_string(),
            "dst" => self.dst = value.to_string(),
            "op" => self.op = value.to_string(),
            "result" => self.result = value.to_string(),
            "details" => self.details = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let s = format!("{value:?}");
        self.record_str(field, &s);
    }
}

/// Emit one transfer log line through `tracing`, with the `src`/`dst`/`op`/
/// `result`/`details` fields [`TransferLogFormat`] expects.
pub fn transfer_event(src: &str, dst: &str, op: Op, result: LogResult, details: &str) {
    match result {
        LogResult::Success => {
            tracing::info!(src, dst, op = %op, result = %result, details, "transfer event")
        }
        LogResult::Error => {
            tracing::error!(src, dst, op = %op, result = %result, details, "transfer event")
        }
    }
}

/// `tracing_subscriber::fmt::FormatEvent` implementation rendering the
/// bracketed transfer log line.
pub struct TransferLogFormat;

impl<S, N> FormatEvent<S, N> for TransferLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = Fields::default();
        event.record(&mut fields);

        if fields.op.is_empty() {
            // Not a structured transfer event (e.g. a startup log line from
            // a library dependency) — fall back to the default rendering
            // via the field visitor so nothing is silently dropped.
            write!(writer, "[{}] ", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
            ctx.format_fields(writer.by_ref(), event)?;
            return writeln!(writer);
        }

        let thread = std::thread::current();
        let thread_id = thread.name().map(str::to_string).unwrap_or_else(|| {
            format!("{:?}", std::thread::current().id())
        });

        writeln!(
            writer,
            "[{}] [{}] [{}] [{}] [{}] [{}] [{}]",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            fields.src,
            fields.dst,
            thread_id,
            fields.op,
            fields.result,
            fields.details,
        )
    }
}

#[cfg(test)]
#[path = "logfmt_tests.rs"]
mod tests;
