// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-spec grammar: `<dir>@<host>:<port>`.
//!
//! Used both for console `add`/`cancel` arguments and for config-file lines
//! (one sync pair per line, see [`crate::config`]).

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{DirSpec, Endpoint};

#[allow(clippy::expect_used)]
static DIR_SPEC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<dir>/[^@]+)@(?P<host>[^:]+):(?P<port>\d+)$")
        .expect("constant regex pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("invalid directory spec '{0}', expected <dir>@<host>:<port>")]
    Malformed(String),

    #[error("port must be a positive integer in '{0}'")]
    InvalidPort(String),
}

/// Parse a single `<dir>@<host>:<port>` token.
pub fn parse_dir_spec(token: &str) -> Result<DirSpec, GrammarError> {
    let caps = DIR_SPEC_PATTERN
        .captures(token)
        .ok_or_else(|| GrammarError::Malformed(token.to_string()))?;

    let port: u16 = caps["port"]
        .parse()
        .map_err(|_| GrammarError::InvalidPort(token.to_string()))?;
    if port == 0 {
        return Err(GrammarError::InvalidPort(token.to_string()));
    }

    Ok(DirSpec {
        dir: caps["dir"].to_string(),
        endpoint: Endpoint { host: caps["host"].to_string(), port },
    })
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod tests;
