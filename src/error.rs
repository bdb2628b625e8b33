// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for case setup and flyer decoding
//!
//! A malformed organization aborts the whole case. A decode failure only
//! costs the flyer it came from.

use thiserror::Error;

/// An organization source that cannot be turned into a rooted tree
#[derive(Debug, Error)]
pub enum MalformedOrganizationError {
    /// No `boss` entry in the source
    #[error("organization has no boss")]
    MissingBoss,

    /// No `leader_key` entry in the source
    #[error("organization has no leader key")]
    MissingLeaderKey,

    /// Leader key is not a positive integer
    #[error("line {line}: leader key must be a positive integer, got `{value}`")]
    InvalidLeaderKey {
        /// 1-based source line (0 for structured sources)
        line: usize,
        /// Raw value as written
        value: String,
    },

    /// A directive that may appear once appeared twice
    #[error("line {line}: `{directive}` declared more than once")]
    DuplicateDirective { line: usize, directive: &'static str },

    /// A parent nickname that is not part of the tree yet
    #[error("line {line}: `{nickname}` is not the boss or a previously declared underling")]
    DanglingReference { line: usize, nickname: String },

    /// A nickname declared twice, which would share or loop a node
    #[error("line {line}: `{nickname}` is already part of the organization")]
    DuplicateMember { line: usize, nickname: String },

    /// Chain of command longer than the organization module accepts
    #[error("line {line}: chain of command reaches depth {depth}")]
    TooDeep { line: usize, depth: usize },

    /// Unrecognized line, empty nickname, or roster punctuation inside one
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("invalid organization yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot read organization source: {0}")]
    Io(#[from] std::io::Error),
}

/// A flyer whose hidden nickname cannot be recovered
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The flyer has no first line to take the digit root of
    #[error("flyer is empty, expected a numeric header line")]
    MissingHeader,

    /// The header contains something other than digits and placeholders
    #[error("header contains non-digit character `{ch}`")]
    InvalidDigit { ch: char },

    /// The flyer ended before the `--` sentinel
    #[error("flyer ended before the `--` sentinel")]
    MissingSentinel,

    /// The digit root does not name a loaded organization
    #[error("digit root {digit} does not select one of {available} organizations")]
    OrganizationOutOfRange { digit: u8, available: usize },

    #[error("cannot read flyer: {0}")]
    Io(#[from] std::io::Error),
}
