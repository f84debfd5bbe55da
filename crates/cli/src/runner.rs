// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test item execution.
//!
//! Runs each test item through pytest, optionally under coverage, then
//! parses the transcript and aggregates a verdict. Items run in parallel
//! using rayon unless coverage is measured.

use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::coverage::{CoverageRequest, ExecuteResult, measure_coverage, standard_execute};
use crate::error::{Error, Result};
use crate::output::{ItemReport, RunOutput};
use crate::parse::{FAILED, TestResult, invoke_command_line, parse_transcript};
use crate::process::CommandRunner;
use crate::verdict::aggregate;

/// Test runner configuration.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Measure coverage, writing reports below this directory.
    pub coverage_dir: Option<PathBuf>,
    /// Number of parallel jobs (0 = one per CPU).
    pub jobs: usize,
    /// Directory the items were discovered under; report paths mirror it.
    pub root: PathBuf,
}

impl RunnerConfig {
    /// Jobs actually used.
    ///
    /// coverage.py keeps its data file in the working directory, so coverage
    /// runs are sequential.
    pub fn effective_jobs(&self) -> usize {
        if self.coverage_dir.is_some() {
            1
        } else {
            self.jobs
        }
    }
}

/// Runs test items and collects their reports.
pub struct TestRunner<'a> {
    runner: &'a dyn CommandRunner,
    config: RunnerConfig,
}

impl<'a> TestRunner<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: RunnerConfig) -> Self {
        Self { runner, config }
    }

    /// Run a single test item.
    pub fn run_item(&self, item: &Path) -> Result<ItemReport> {
        let command_line = invoke_command_line(item);
        tracing::info!("running {}", item.display());
        let start = Instant::now();

        let executed = match &self.config.coverage_dir {
            Some(dir) => {
                let output_dir = item_output_dir(dir, &self.config.root, item);
                let request = CoverageRequest::new(item, command_line, output_dir);
                measure_coverage(&request, self.runner)
            }
            None => standard_execute(&command_line, self.runner),
        };
        let (execution, output) = match executed {
            Ok(executed) => executed,
            Err(Error::Timeout { timeout, .. }) => {
                return Ok(timed_out(item, timeout, start.elapsed()));
            }
            Err(e) => return Err(e),
        };

        // The verdict comes from the transcript alone; a crash with no output
        // reads as invalid output.
        tracing::debug!("{} exited with {}", item.display(), execution.result);

        let test = parse_transcript(item, &output)?;
        let verdict = aggregate(&test, execution.coverage.as_ref());

        Ok(ItemReport {
            test_item: item.to_path_buf(),
            verdict,
            execution,
            test,
        })
    }

    /// Run all items, keeping their order in the output.
    pub fn run_all(&self, items: &[PathBuf]) -> Result<RunOutput> {
        let jobs = self.config.effective_jobs();

        let reports = if jobs == 1 || items.len() < 2 {
            items
                .iter()
                .map(|item| self.run_item(item))
                .collect::<Result<Vec<_>>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| Error::Internal(format!("failed to start worker pool: {e}")))?;
            pool.install(|| {
                items
                    .par_iter()
                    .map(|item| self.run_item(item))
                    .collect::<Result<Vec<_>>>()
            })?
        };

        Ok(RunOutput::new(reports))
    }
}

/// Failed report for an item whose test command hit the timeout.
fn timed_out(item: &Path, timeout: Duration, elapsed: Duration) -> ItemReport {
    let status = format!("Timed out after {timeout:?}");
    tracing::warn!("{}: {status}", item.display());

    let test = TestResult {
        result: FAILED,
        duration: Duration::ZERO,
        short_desc: status,
        subtests: None,
        benchmarks: None,
    };
    ItemReport {
        test_item: item.to_path_buf(),
        verdict: aggregate(&test, None),
        execution: ExecuteResult::new(FAILED, elapsed),
        test,
    }
}

/// Report directory for one item: its path below `root`, without extension.
///
/// `out`, `.`, `./a/UnitTests/Add_UnitTest.py` gives `out/a/UnitTests/Add_UnitTest`.
pub fn item_output_dir(base: &Path, root: &Path, item: &Path) -> PathBuf {
    let relative = item.strip_prefix(root).unwrap_or(item).with_extension("");
    let mut dir = base.to_path_buf();
    let mut nested = false;
    for component in relative.components() {
        if let Component::Normal(part) = component {
            dir.push(part);
            nested = true;
        }
    }

    // An item passed as the root itself strips to nothing
    if !nested && let Some(stem) = item.file_stem() {
        dir.push(stem);
    }
    dir
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
