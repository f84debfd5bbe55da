// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pylint score verification.
//!
//! A test item is linted through its subject: `UnitTests/Add_UnitTest.py`
//! scores `Add.py`. The score pylint prints is compared to a passing score.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::Serialize;

use crate::config::LintConfig;
use crate::error::Result;
use crate::parse::{FAILED, PASSED};
use crate::process::CommandRunner;
use crate::resolve::{PACKAGE_INIT, is_test_item, subject_for_test};

/// Configuration file names searched in ancestor directories, in order.
const RCFILE_NAMES: &[&str] = &["pylintrc", ".pylintrc"];

#[allow(clippy::expect_used)]
static SCORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Your code has been rated at (?P<score>[-\d\.]+)/(?P<max>[\d\.]+)")
        .expect("valid regex")
});

/// Outcome of linting one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintResult {
    /// 0 when skipped or passing, -1 when failing or unreadable.
    pub result: i32,
    pub duration: Duration,
    pub short_desc: String,
    /// File that was linted (the subject when converted from a test item).
    pub target: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub passing_score: f64,
    /// Whether the passing score was supplied rather than defaulted.
    pub explicit_passing_score: bool,
}

impl LintResult {
    fn new(target: PathBuf, config: &LintConfig, start: Instant) -> Self {
        Self {
            result: PASSED,
            duration: start.elapsed(),
            short_desc: String::new(),
            target,
            score: None,
            max_score: None,
            passing_score: config.passing_score(),
            explicit_passing_score: config.is_explicit(),
        }
    }

    fn finish(mut self, result: i32, short_desc: impl Into<String>, start: Instant) -> Self {
        self.result = result;
        self.short_desc = short_desc.into();
        self.duration = start.elapsed();
        self
    }

    pub fn is_skipped(&self) -> bool {
        self.short_desc.starts_with("Skipped")
    }
}

/// Lint a file, or the subject of a test item.
pub fn verify(item: &Path, config: &LintConfig, runner: &dyn CommandRunner) -> Result<LintResult> {
    let start = Instant::now();

    let target = match subject_for_test(item) {
        Some(subject) => {
            tracing::info!(
                "test item {} converted to {}",
                item.display(),
                subject.display()
            );
            subject
        }
        None => item.to_path_buf(),
    };
    let mut result = LintResult::new(target.clone(), config, start);

    if let Some(reason) = skip_reason(&target) {
        tracing::info!("skipping {}: {reason}", target.display());
        return Ok(result.finish(PASSED, format!("Skipped ({reason})"), start));
    }

    let rcfile = find_rcfile(&target);
    let command_line = pylint_command_line(&target, rcfile.as_deref());
    tracing::debug!("command line: {command_line}");

    // pylint exits non-zero for warnings, so only the printed score matters
    let output = runner.run(&command_line)?;
    tracing::debug!("pylint exited with {}", output.code);

    let Some((score, max_score)) = extract_score(&output.output) else {
        tracing::warn!("pylint output for {} has no score", target.display());
        return Ok(result.finish(FAILED, "Invalid pylint output", start));
    };

    let passing = result.passing_score;
    result.score = Some(score);
    result.max_score = Some(max_score);

    // Debug keeps the decimal point on whole scores ("9.0", not "9")
    if score < passing {
        Ok(result.finish(FAILED, format!("{score:?} < {passing:?}"), start))
    } else {
        Ok(result.finish(PASSED, format!("{score:?} >= {passing:?}"), start))
    }
}

/// Reason a target is not linted, if any.
fn skip_reason(target: &Path) -> Option<&'static str> {
    let metadata = std::fs::metadata(target).ok().filter(|m| m.is_file());
    let Some(metadata) = metadata else {
        return Some("file does not exist");
    };

    if target.file_name().and_then(|n| n.to_str()) == Some(PACKAGE_INIT) && metadata.len() == 0 {
        return Some(PACKAGE_INIT);
    }
    if is_test_item(target) {
        return Some("test item");
    }
    None
}

/// Find the nearest pylint configuration above `target`.
pub fn find_rcfile(target: &Path) -> Option<PathBuf> {
    target.ancestors().skip(1).find_map(|dir| {
        RCFILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.exists())
    })
}

/// Build the pylint invocation for a file.
pub fn pylint_command_line(target: &Path, rcfile: Option<&Path>) -> String {
    match rcfile {
        Some(rc) => format!(
            "python -m pylint --persistent n --rcfile \"{}\" \"{}\"",
            rc.display(),
            target.display()
        ),
        None => format!("python -m pylint --persistent n \"{}\"", target.display()),
    }
}

/// Extract `(score, max)` from pylint's report.
///
/// Returns None when the rating line is missing or not a valid score.
pub fn extract_score(output: &str) -> Option<(f64, f64)> {
    let caps = SCORE_PATTERN.captures(output)?;
    let score: f64 = caps["score"].parse().ok()?;
    let max: f64 = caps["max"].parse().ok()?;

    (max > 0.0 && score <= max).then_some((score, max))
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
