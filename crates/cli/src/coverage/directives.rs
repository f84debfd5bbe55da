// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage directives embedded in test source.
//!
//! ```python
//! # code_coverage: disable
//! # code_coverage: include = ../Add.py
//! # code_coverage: exclude = "../Generated.py"
//! ```
//!
//! Paths are relative to the test file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

#[allow(clippy::expect_used)]
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*#\s*code_coverage\s*:\s*(?P<action>[A-Za-z_]+)(?:\s*=\s*(?:"(?P<quoted>[^"]+)"|(?P<name>.+?)))?\s*$"#,
    )
    .expect("valid regex")
});

/// Coverage settings declared by a test file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageDirectives {
    /// Run the test without coverage instrumentation.
    pub disabled: bool,
    /// Files to measure, resolved to absolute paths.
    pub includes: Vec<PathBuf>,
    /// Files to leave out, resolved to absolute paths.
    pub excludes: Vec<PathBuf>,
}

impl CoverageDirectives {
    pub fn is_empty(&self) -> bool {
        !self.disabled && self.includes.is_empty() && self.excludes.is_empty()
    }
}

/// Read directives from a test file on disk.
pub fn read_directives(test_file: &Path) -> Result<CoverageDirectives> {
    let source = fs::read_to_string(test_file).map_err(|e| Error::Io {
        path: test_file.to_path_buf(),
        source: e,
    })?;
    parse_directives(test_file, &source)
}

/// Parse directives from the source of `test_file`.
///
/// A directive naming a file that doesn't exist, or an unknown action, is a
/// configuration error.
pub fn parse_directives(test_file: &Path, source: &str) -> Result<CoverageDirectives> {
    let base = test_file.parent().unwrap_or_else(|| Path::new("."));
    let mut directives = CoverageDirectives::default();

    for (index, line) in source.lines().enumerate() {
        let Some(caps) = DIRECTIVE_PATTERN.captures(line) else {
            continue;
        };
        let line_number = index + 1;
        let action = caps["action"].to_lowercase();
        let name = caps.name("quoted").or_else(|| caps.name("name"));

        match (action.as_str(), name) {
            ("disable", _) => directives.disabled = true,
            ("include", Some(name)) => directives
                .includes
                .push(resolve_referenced(test_file, base, name.as_str(), line_number)?),
            ("exclude", Some(name)) => directives
                .excludes
                .push(resolve_referenced(test_file, base, name.as_str(), line_number)?),
            ("include" | "exclude", None) => {
                return Err(config_error(
                    test_file,
                    format!("'{action}', on line {line_number}, requires a file name"),
                ));
            }
            _ => {
                return Err(config_error(
                    test_file,
                    format!("'{action}', on line {line_number}, is not a supported action"),
                ));
            }
        }
    }

    if !directives.is_empty() {
        tracing::debug!("{}: {:?}", test_file.display(), directives);
    }
    Ok(directives)
}

fn resolve_referenced(
    test_file: &Path,
    base: &Path,
    name: &str,
    line_number: usize,
) -> Result<PathBuf> {
    let referenced = base.join(name);
    match fs::canonicalize(&referenced) {
        Ok(path) if path.is_file() => Ok(path),
        _ => Err(config_error(
            test_file,
            format!(
                "'{}', referenced on line {line_number}, is not a valid file",
                referenced.display()
            ),
        )),
    }
}

fn config_error(test_file: &Path, message: String) -> Error {
    Error::Config {
        message,
        path: Some(test_file.to_path_buf()),
    }
}

#[cfg(test)]
#[path = "directives_tests.rs"]
mod tests;
