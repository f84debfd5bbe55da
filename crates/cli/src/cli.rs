// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use termcolor::ColorChoice;

use crate::color::resolve_color;

/// Parses pytest and coverage.py output into structured test results
#[derive(Parser)]
#[command(name = "devtester")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "DEVTESTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Color choice from flags and environment.
    pub fn color_choice(&self) -> ColorChoice {
        resolve_color(self.color, self.no_color)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the production file a test item exercises
    Subject(SubjectArgs),
    /// Parse a pytest transcript
    Parse(ParseArgs),
    /// Run test items with pytest and report verdicts
    Run(RunArgs),
    /// Check the pylint score of a file or a test item's subject
    Lint(LintArgs),
}

#[derive(clap::Args)]
pub struct SubjectArgs {
    /// Test item (e.g. pkg/UnitTests/Add_UnitTest.py)
    #[arg(value_name = "TEST")]
    pub test: PathBuf,
}

#[derive(clap::Args)]
pub struct ParseArgs {
    /// Test item the transcript belongs to
    #[arg(value_name = "TEST")]
    pub test: PathBuf,

    /// Read the transcript from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Test item or directory to search for test items
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Test type to run (default: from config, UnitTest)
    #[arg(long, value_name = "TYPE")]
    pub test_type: Option<String>,

    /// Measure code coverage with coverage.py
    #[arg(long)]
    pub coverage: bool,

    /// Number of test items to run in parallel (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(clap::Args)]
pub struct LintArgs {
    /// Python file or test item
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Lowest passing pylint score (default: from config, 9.0)
    #[arg(long, value_name = "SCORE")]
    pub passing_score: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
