// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config-file parsing: one sync pair per line.
//!
//! `<source_dir>@<source_host>:<source_port> <target_dir>@<target_host>:<target_port>`
//!
//! Lines starting with `#` and blank lines are comments. Each parsed line is
//! equivalent to an `add` submitted at startup.

use thiserror::Error;

use crate::grammar::{parse_dir_spec, GrammarError};
use crate::types::SyncPair;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: expected '<source> <target>', got '{text}'")]
    MissingTarget { line: usize, text: String },

    #[error("line {line}: {source}")]
    BadSpec {
        line: usize,
        #[source]
        source: GrammarError,
    },
}

/// Parse a whole config file's contents into the pairs it describes, in
/// file order.
pub fn parse_config(contents: &str) -> Result<Vec<SyncPair>, ConfigError> {
    let mut pairs = Vec::new();
    for (idx, raw_line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let source_tok = tokens.next().unwrap_or_default();
        let target_tok = tokens.next();

        let Some(target_tok) = target_tok else {
            return Err(ConfigError::MissingTarget { line: line_no, text: line.to_string() });
        };

        let source = parse_dir_spec(source_tok)
            .map_err(|source| ConfigError::BadSpec { line: line_no, source })?;
        let target = parse_dir_spec(target_tok)
            .map_err(|source| ConfigError::BadSpec { line: line_no, source })?;

        pairs.push(SyncPair::new(source, target));
    }
    Ok(pairs)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
