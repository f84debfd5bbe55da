// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for test results.

pub mod json;
pub mod text;

use std::path::PathBuf;

use serde::Serialize;

use crate::coverage::ExecuteResult;
use crate::parse::TestResult;
use crate::verdict::Verdict;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Everything reported for one executed test item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub test_item: PathBuf,
    pub verdict: Verdict,
    /// Test command outcome, with coverage when it was measured.
    pub execution: ExecuteResult,
    /// Parsed transcript.
    pub test: TestResult,
}

/// Result of `devtester run` over all discovered items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutput {
    pub passed: bool,
    pub items: Vec<ItemReport>,
}

impl RunOutput {
    pub fn new(items: Vec<ItemReport>) -> Self {
        Self {
            passed: items.iter().all(|i| i.verdict.is_passed()),
            items,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|i| !i.verdict.is_passed()).count()
    }
}
