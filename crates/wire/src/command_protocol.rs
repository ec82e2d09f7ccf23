// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The manager ↔ console text protocol: newline-terminated commands, one
//! reply line per command.

use std::fmt;

use sf_core::{parse_dir_spec, DirSpec, GrammarError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { source: DirSpec, target: DirSpec },
    Cancel { source: DirSpec },
    /// Read-only snapshot of the registry, for operator visibility
    /// alongside the mutating commands.
    Status,
    Shutdown,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("add requires <source> <target>")]
    AddMissingArgs,

    #[error("cancel requires <source>")]
    CancelMissingArgs,

    #[error("{0}")]
    BadSpec(#[from] GrammarError),
}

/// Parse one newline-stripped command line from a console session.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(CommandError::Empty)?;

    match verb {
        "add" => {
            let source_tok = tokens.next().ok_or(CommandError::AddMissingArgs)?;
            let target_tok = tokens.next().ok_or(CommandError::AddMissingArgs)?;
            Ok(Command::Add {
                source: parse_dir_spec(source_tok)?,
                target: parse_dir_spec(target_tok)?,
            })
        }
        "cancel" => {
            let source_tok = tokens.next().ok_or(CommandError::CancelMissingArgs)?;
            Ok(Command::Cancel { source: parse_dir_spec(source_tok)? })
        }
        "status" => Ok(Command::Status),
        "shutdown" => Ok(Command::Shutdown),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// A reply line sent back to the console for a processed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Added { source: DirSpec, target: DirSpec },
    AlreadyInQueue { source: DirSpec },
    Error { message: String },
    SyncStopped { source: DirSpec },
    NotSynced { source: DirSpec },
    ShuttingDown,
    Status { lines: Vec<String> },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Added { source, target } => write!(f, "Added {source} -> {target}"),
            Reply::AlreadyInQueue { source } => write!(f, "Already in queue: {source}"),
            Reply::Error { message } => write!(f, "Error {message}"),
            Reply::SyncStopped { source } => write!(f, "Synchronization stopped for {source}"),
            Reply::NotSynced { source } => {
                write!(f, "Directory not being synchronized: {source}")
            }
            Reply::ShuttingDown => write!(f, "Shutting down …"),
            Reply::Status { lines } => write!(f, "{}", lines.join("\n")),
        }
    }
}

#[cfg(test)]
#[path = "command_protocol_tests.rs"]
mod tests;
