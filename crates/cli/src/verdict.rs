// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Final status for one test item.
//!
//! Combines the parsed transcript with the optional coverage measurement into
//! the `(code, status)` pair reported to callers.

use serde::Serialize;

use crate::coverage::CoverageResult;
use crate::parse::TestResult;

/// Aggregated outcome of one test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    /// Test result code (0 pass, -1 failure, -2 invalid output).
    pub code: i32,
    /// Human-readable status line.
    pub status: String,
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        self.code == 0
    }
}

/// Combine a test result with its coverage measurement.
///
/// The code always comes from the test result; coverage only extends the
/// status text.
pub fn aggregate(test: &TestResult, coverage: Option<&CoverageResult>) -> Verdict {
    let mut status = test.short_desc.clone();

    match coverage {
        Some(c) if !c.success() => status.push_str(", coverage failed"),
        Some(CoverageResult {
            coverage_percentage: Some(fraction),
            ..
        }) => status.push_str(&format!(", coverage {}%", format_percent(*fraction))),
        _ => {}
    }

    Verdict {
        code: test.result,
        status,
    }
}

/// Render a 0.0-1.0 fraction as a percentage with one decimal.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}", fraction * 100.0)
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
