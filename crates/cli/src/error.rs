// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Devtester error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file or coverage directive is invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tool output did not follow the expected format.
    #[error("format error: {0}")]
    Format(String),

    /// External command exceeded its time limit.
    #[error("command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using devtester Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every test item passed
    Success = 0,
    /// One or more test items failed
    TestsFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Format(_) | Error::Internal(_) => ExitCode::InternalError,
            Error::Timeout { .. } => ExitCode::TestsFailed,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
