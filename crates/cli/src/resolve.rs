// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test item / subject name resolution.
//!
//! Test items follow the `<name>_<Type>Test<ext>` naming convention and may
//! live in a sibling folder named after the pluralized test type:
//!
//! ```text
//! src/pkg/Add.py
//! src/pkg/UnitTests/Add_UnitTest.py          -> src/pkg/Add.py
//! src/pkg/Add_IntegrationTest.py             -> src/pkg/Add.py
//! src/pkg/UnitTests/pkg_UnitTest.py          -> src/pkg/__init__.py (if non-empty)
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// File names that are never treated as test items.
const RESERVED_NAMES: &[&str] = &["__init__.py", "__main__.py", "Build.py"];

/// Package marker file.
pub const PACKAGE_INIT: &str = "__init__.py";

#[allow(clippy::expect_used)]
static TEST_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+)[._](?P<test_type>[^_.]+Test)(?P<ext>\..+)$").expect("valid regex")
});

/// A file name split into its test item components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Name of the subject (`Add` for `Add_UnitTest.py`).
    pub name: String,
    /// Test type tag (`UnitTest`).
    pub test_type: String,
    /// Extension including the leading dot.
    pub ext: String,
}

impl TestItem {
    /// Split a path into test item components.
    ///
    /// Returns None when the file name does not follow the test item convention.
    pub fn parse(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let caps = TEST_ITEM_PATTERN.captures(file_name)?;

        Some(Self {
            path: path.to_path_buf(),
            name: caps["name"].to_string(),
            test_type: caps["test_type"].to_string(),
            ext: caps["ext"].to_string(),
        })
    }

    /// Folder name that groups test items of this type (`UnitTests`).
    pub fn type_folder(&self) -> String {
        pluralize(&self.test_type)
    }
}

/// Find the production file exercised by a test item.
///
/// Returns None when the name does not follow the test item convention or no
/// subject exists on disk, in which case the test item is standalone.
pub fn subject_for_test(test_path: &Path) -> Option<PathBuf> {
    if !is_supported_test_item(test_path) {
        return None;
    }

    let item = TestItem::parse(test_path)?;
    let resolved = fs::canonicalize(test_path).ok()?;

    let mut parent = resolved.parent()?;
    if parent.file_name().and_then(|n| n.to_str()) == Some(item.type_folder().as_str()) {
        parent = parent.parent()?;
    }

    let candidate = parent.join(format!("{}{}", item.name, item.ext));
    if candidate.is_file() {
        tracing::debug!(
            "test item {} converted to {}",
            test_path.display(),
            candidate.display()
        );
        return Some(candidate);
    }

    // The subject may be the package itself
    let package = parent.join(PACKAGE_INIT);
    if is_non_empty_file(&package) {
        tracing::debug!(
            "test item {} converted to package {}",
            test_path.display(),
            package.display()
        );
        return Some(package);
    }

    None
}

/// Name of the test item that would exercise `subject`.
///
/// `test_type` may be given in singular or plural form (`UnitTest` or
/// `UnitTests`). Returns the input unchanged if it is already a test item.
pub fn test_for_subject(subject: &Path, test_type: &str) -> Option<PathBuf> {
    let file_name = subject.file_name()?.to_str()?;
    let stem = subject.file_stem()?.to_str()?;

    if stem.to_lowercase().ends_with("impl") {
        return None;
    }
    if file_name == PACKAGE_INIT && !is_non_empty_file(subject) {
        return None;
    }
    if file_name == "__main__.py" {
        return None;
    }
    if is_test_item(subject) {
        return Some(subject.to_path_buf());
    }

    let ext = subject
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    Some(subject.with_file_name(format!("{stem}_{}{ext}", singularize(test_type))))
}

/// Check whether a path names a test item.
pub fn is_test_item(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    file_name != PACKAGE_INIT && TEST_ITEM_PATTERN.is_match(file_name)
}

/// Check whether a file may be run as a test item.
///
/// Package entry points and implementation-detail files (`*Impl.py`) are not.
pub fn is_supported_test_item(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if RESERVED_NAMES.contains(&file_name) {
        return false;
    }

    !path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.to_lowercase().ends_with("impl"))
}

/// Pluralize a test type tag (`UnitTest` -> `UnitTests`).
pub fn pluralize(test_type: &str) -> String {
    if test_type.ends_with('s') {
        test_type.to_string()
    } else {
        format!("{test_type}s")
    }
}

/// Singularize a test type tag (`UnitTests` -> `UnitTest`).
pub fn singularize(test_type: &str) -> &str {
    test_type.strip_suffix('s').unwrap_or(test_type)
}

fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() != 0)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
