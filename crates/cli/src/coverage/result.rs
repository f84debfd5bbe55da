// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Execution and coverage result types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

/// Result of a coverage measurement pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    /// Exit code of the report export step (non-zero on failure).
    pub result: i32,
    /// Time spent exporting and reading the report.
    pub duration: Duration,
    pub short_desc: String,
    /// Cobertura report, when the tool produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    /// Overall line coverage (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_percentage: Option<f64>,
    /// Per-file line coverage (0.0-1.0) keyed by report file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_percentages: Option<BTreeMap<String, f64>>,
}

impl CoverageResult {
    /// Create a result for a failed export step.
    pub fn failed(result: i32, duration: Duration, report: Option<PathBuf>) -> Self {
        Self {
            result,
            duration,
            short_desc: format!("Coverage generation failed ({result})"),
            report,
            coverage_percentage: None,
            coverage_percentages: None,
        }
    }

    /// Create a result from parsed report data.
    pub fn measured(
        duration: Duration,
        report: PathBuf,
        coverage: f64,
        files: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            result: 0,
            duration,
            short_desc: format!("Coverage: {coverage}"),
            report: Some(report),
            coverage_percentage: Some(coverage),
            coverage_percentages: (!files.is_empty()).then_some(files),
        }
    }

    pub fn success(&self) -> bool {
        self.result == 0
    }

    /// Coverage of a single file.
    ///
    /// Report file names are usually relative to the directory coverage ran
    /// in, so `path` matches any entry it ends with.
    pub fn file_coverage(&self, path: &Path) -> Option<f64> {
        let files = self.coverage_percentages.as_ref()?;
        files
            .iter()
            .filter(|(name, _)| path.ends_with(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, pct)| *pct)
    }
}

/// Result of executing one test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteResult {
    /// Raw exit code of the test command.
    pub result: i32,
    /// Time spent running the test command.
    pub duration: Duration,
    pub short_desc: String,
    /// Attached whenever coverage instrumentation ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageResult>,
}

impl ExecuteResult {
    pub fn new(result: i32, duration: Duration) -> Self {
        Self {
            result,
            duration,
            short_desc: execute_desc(result).to_string(),
            coverage: None,
        }
    }

    pub fn with_coverage(mut self, coverage: CoverageResult) -> Self {
        self.coverage = Some(coverage);
        self
    }
}

/// Summary for a test command exit code.
pub fn execute_desc(result: i32) -> &'static str {
    if result < 0 {
        "Test failed"
    } else if result > 0 {
        "Test has warnings"
    } else {
        "Test passed"
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
