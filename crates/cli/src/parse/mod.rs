// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pytest transcript parsing.
//!
//! Turns the verbose output of `pytest -vv` into per-sub-test results and
//! optional pytest-benchmark statistics.

mod benchmark;
mod result;

pub use benchmark::parse_benchmarks;
pub use result::{
    BenchmarkStat, FAILED, INVALID_OUTPUT, PASSED, SubtestResult, TestResult, Units, count_noun,
};

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;

use crate::error::{Error, Result};

/// Summary used when the transcript has no sub-test records.
pub const INVALID_OUTPUT_DESC: &str = "Invalid test output";

/// Matches one verbose sub-test record, e.g.
/// `test_math.py::test_add PASSED                            [ 50%]`.
#[allow(clippy::expect_used)]
static SUBTEST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<filename>.+?\.py)::(?P<test>.+?)\s+(?P<result>[A-Z]+)(?:\s+\[\s*\d+%\])?\s*$",
    )
    .expect("valid regex")
});

/// Short test summary lines (`FAILED a.py::test - msg`) repeat a record
/// behind its result token.
fn is_summary_record(filename: &str) -> bool {
    filename.split_once(' ').is_some_and(|(head, _)| {
        !head.is_empty() && head.bytes().all(|b| b.is_ascii_uppercase())
    })
}

/// Command line that produces a transcript `parse_transcript` understands.
pub fn invoke_command_line(test_item: &Path) -> String {
    format!(
        "pytest --verbose -vv --capture=no \"{}\"",
        test_item.display()
    )
}

/// Check whether a path can be run through pytest.
pub fn is_supported_test_item(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == "py")
}

/// Parse a pytest transcript for `test_item`.
///
/// An empty or unrecognizable transcript is not an error: it produces a
/// result with code -2. Only violations of the transcript format (an unknown
/// result token, a malformed benchmark table) are errors.
pub fn parse_transcript(test_item: &Path, transcript: &str) -> Result<TestResult> {
    let start = Instant::now();

    let mut subtests = BTreeMap::new();
    let mut failures = 0usize;

    for caps in SUBTEST_PATTERN.captures_iter(transcript) {
        if is_summary_record(&caps["filename"]) {
            continue;
        }
        let subtest = match &caps["result"] {
            "PASSED" => SubtestResult::passed(),
            "FAILED" => {
                failures += 1;
                SubtestResult::failed()
            }
            other => {
                return Err(Error::Format(format!(
                    "unexpected result {other:?} for {}::{}",
                    &caps["filename"], &caps["test"]
                )));
            }
        };
        subtests.insert(caps["test"].to_string(), subtest);
    }

    let benchmarks = parse_benchmarks(transcript, test_item)?;

    let (result, short_desc) = if subtests.is_empty() {
        (INVALID_OUTPUT, INVALID_OUTPUT_DESC.to_string())
    } else if failures != 0 {
        (FAILED, format!("{} failed", count_noun(failures, "test")))
    } else {
        (
            PASSED,
            format!("{} passed", count_noun(subtests.len(), "test")),
        )
    };

    tracing::debug!("{}: {short_desc}", test_item.display());

    let benchmarks = if benchmarks.is_empty() {
        None
    } else {
        let key = test_item
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| test_item.display().to_string());
        Some(BTreeMap::from([(key, benchmarks)]))
    };

    Ok(TestResult {
        result,
        duration: start.elapsed(),
        short_desc,
        subtests: (!subtests.is_empty()).then_some(subtests),
        benchmarks,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
