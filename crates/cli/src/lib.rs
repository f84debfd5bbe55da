// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test result parsing and coverage correlation for Python projects.
//!
//! Turns pytest transcripts and coverage.py reports into structured results,
//! and maps test items back to the production files they exercise.

pub mod cli;
pub mod color;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod env;
pub mod error;
pub mod lint;
pub mod output;
pub mod parse;
pub mod process;
pub mod resolve;
pub mod runner;
pub mod verdict;
pub mod walker;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use coverage::{CoverageResult, ExecuteResult, measure_coverage};
pub use error::{Error, ExitCode, Result};
pub use lint::LintResult;
pub use parse::{BenchmarkStat, SubtestResult, TestResult, Units, parse_transcript};
pub use resolve::{subject_for_test, test_for_subject};
pub use verdict::{Verdict, aggregate};
