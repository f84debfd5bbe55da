// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed test result types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

/// Result code for a passing test or sub-test.
pub const PASSED: i32 = 0;
/// Result code for a failing test or sub-test.
pub const FAILED: i32 = -1;
/// Result code when the transcript contained no sub-test records.
pub const INVALID_OUTPUT: i32 = -2;

/// Outcome of one named sub-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubtestResult {
    /// 0 = pass, negative = fail.
    pub result: i32,
    /// Sub-test duration (zero when the runner doesn't report it).
    pub duration: Duration,
}

impl SubtestResult {
    pub fn passed() -> Self {
        Self {
            result: PASSED,
            duration: Duration::ZERO,
        }
    }

    pub fn failed() -> Self {
        Self {
            result: FAILED,
            duration: Duration::ZERO,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.result == PASSED
    }
}

/// Unit of measure for benchmark timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl Units {
    /// Short unit label as printed by pytest-benchmark.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Seconds => "s",
            Units::Milliseconds => "ms",
            Units::Microseconds => "us",
            Units::Nanoseconds => "ns",
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Units::Seconds),
            "ms" => Ok(Units::Milliseconds),
            "us" | "μs" => Ok(Units::Microseconds),
            "ns" => Ok(Units::Nanoseconds),
            other => Err(format!("unknown benchmark unit: {other}")),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One benchmark measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkStat {
    pub name: String,
    pub source_file: PathBuf,
    /// Line of the benchmark in `source_file`; pytest-benchmark doesn't
    /// report it, so this is always 1.
    pub line: u32,
    /// Runtime and tool versions (`3.11.4 / pytest-7.4.0 / benchmark-4.0.0`).
    pub version: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub rounds: u64,
    pub units: Units,
    pub iterations: u64,
}

/// Aggregate verdict for one parsed test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// 0 = all passed, -1 = failures, -2 = no parseable sub-test output.
    pub result: i32,
    /// Time spent parsing the transcript.
    pub duration: Duration,
    /// Short human-readable summary.
    pub short_desc: String,
    /// Sub-test results keyed by name; None when no sub-tests were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtests: Option<BTreeMap<String, SubtestResult>>,
    /// Benchmarks keyed by source file name; None when no benchmarks were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<BTreeMap<String, Vec<BenchmarkStat>>>,
}

impl TestResult {
    /// Replace the recorded duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_passed(&self) -> bool {
        self.result == PASSED
    }

    /// Number of sub-tests found.
    pub fn subtest_count(&self) -> usize {
        self.subtests.as_ref().map_or(0, |s| s.len())
    }

    /// Number of failing sub-tests.
    pub fn failed_count(&self) -> usize {
        self.subtests
            .as_ref()
            .map_or(0, |s| s.values().filter(|r| !r.is_passed()).count())
    }

    /// Total number of benchmark measurements across all files.
    pub fn benchmark_count(&self) -> usize {
        self.benchmarks
            .as_ref()
            .map_or(0, |b| b.values().map(Vec::len).sum())
    }
}

/// Format a count with its noun, pluralized (`1 test`, `2 tests`).
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
