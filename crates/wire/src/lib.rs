// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocols for the sync-fleet services.
//!
//! - [`command_protocol`]: the manager ↔ console text protocol.
//! - [`transfer_protocol`]: the LIST/PULL/PUSH file-transfer protocol.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod command_protocol;
pub mod transfer_protocol;

pub use command_protocol::{parse_command, Command, CommandError, Reply};
pub use transfer_protocol::{
    list_request_line, parse_pull_header, pull_request_line, push_chunk_header, push_close_line,
    push_open_line, try_parse_list_reply, ListReply, ProtocolError, PullHeader, CHUNK_SIZE,
    LIST_SENTINEL,
};
