// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test item discovery with gitignore support.
//!
//! Uses the `ignore` crate so `.gitignore`, `.ignore` and `.devtesterignore`
//! files keep virtualenvs and build output out of the search.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Error, Result};
use crate::parse::is_supported_test_item as is_python_file;
use crate::resolve::{TestItem, is_supported_test_item, singularize};

/// Maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Project-specific ignore file, same syntax as `.gitignore`.
pub const IGNORE_FILE_NAME: &str = ".devtesterignore";

/// Directories never searched for test items.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    "node_modules",
    ".devtester",
];

/// Helper to check if an ignore::Error is a symlink loop error.
fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. } => is_loop_error(err),
        ignore::Error::WithDepth { err, .. } => is_loop_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
}

/// Check whether a file is a runnable test item of `test_type`.
pub fn matches_test_type(path: &Path, test_type: &str) -> bool {
    if !is_python_file(path) || !is_supported_test_item(path) {
        return false;
    }
    TestItem::parse(path).is_some_and(|item| item.test_type == singularize(test_type))
}

/// Find test items of `test_type` under `root`, sorted by path.
///
/// A file `root` is returned as-is when it is a matching test item.
pub fn discover_test_items(root: &Path, test_type: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::Argument(format!(
            "path does not exist: {}",
            root.display()
        )));
    }
    if root.is_file() {
        return Ok(if matches_test_type(root, test_type) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(true)
        .max_depth(Some(DEFAULT_MAX_DEPTH))
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .filter_entry(|entry| !is_skipped_dir(entry));

    let mut items = Vec::new();
    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                let is_file = entry.file_type().is_some_and(|t| t.is_file());
                if is_file && matches_test_type(entry.path(), test_type) {
                    items.push(entry.into_path());
                }
            }
            Err(err) if is_loop_error(&err) => {
                tracing::warn!("symlink loop detected: {err}");
            }
            Err(err) => tracing::warn!("walk error: {err}"),
        }
    }

    items.sort();
    tracing::debug!(
        "found {} {} item(s) under {}",
        items.len(),
        test_type,
        root.display()
    );
    Ok(items)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
