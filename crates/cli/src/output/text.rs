// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! PASS    src/pkg/UnitTests/Add_UnitTest.py: 2 tests passed, coverage 85.0%
//! FAIL    src/pkg/UnitTests/Sub_UnitTest.py: 1 test failed
//!     test_sub: FAIL
//! ```

use std::io::{self, Write};
use std::path::Path;

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::{ItemReport, RunOutput};
use crate::color::scheme;
use crate::lint::LintResult;
use crate::parse::{BenchmarkStat, INVALID_OUTPUT, TestResult, count_noun};

/// Label and color for a result code.
pub fn result_label(code: i32) -> (&'static str, ColorSpec) {
    match code {
        0 => ("PASS", scheme::pass()),
        INVALID_OUTPUT => ("INVALID", scheme::invalid()),
        c if c < 0 => ("FAIL", scheme::fail()),
        _ => ("WARN", scheme::warn()),
    }
}

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, text: &str, spec: &ColorSpec) -> io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    /// Write `LABEL   path: summary`.
    fn write_line(
        &mut self,
        label: &str,
        spec: &ColorSpec,
        path: &Path,
        summary: &str,
    ) -> io::Result<()> {
        self.write_styled(&format!("{label:<8}"), spec)?;
        self.write_styled(&path.display().to_string(), &scheme::path())?;
        writeln!(self.out, ": {summary}")
    }

    /// Write one `devtester run` item; failing sub-tests are listed below it.
    pub fn write_item(&mut self, report: &ItemReport) -> io::Result<()> {
        let (label, spec) = result_label(report.verdict.code);
        self.write_line(label, &spec, &report.test_item, &report.verdict.status)?;

        if let Some(subtests) = &report.test.subtests {
            for (name, result) in subtests.iter().filter(|(_, r)| !r.is_passed()) {
                write!(self.out, "    {name}: ")?;
                self.write_styled("FAIL", &scheme::fail())?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    /// Write a parsed transcript with every sub-test and benchmark.
    pub fn write_test_result(&mut self, item: &Path, result: &TestResult) -> io::Result<()> {
        let (label, spec) = result_label(result.result);
        self.write_line(label, &spec, item, &result.short_desc)?;

        if let Some(subtests) = &result.subtests {
            for (name, subtest) in subtests {
                let (label, spec) = result_label(subtest.result);
                write!(self.out, "    {name}: ")?;
                self.write_styled(label, &spec)?;
                writeln!(self.out)?;
            }
        }

        if let Some(benchmarks) = &result.benchmarks {
            for (file, stats) in benchmarks {
                writeln!(self.out, "  {file}:")?;
                for stat in stats {
                    self.write_benchmark(stat)?;
                }
            }
        }
        Ok(())
    }

    fn write_benchmark(&mut self, stat: &BenchmarkStat) -> io::Result<()> {
        write!(self.out, "    {}: mean {} {} ", stat.name, stat.mean, stat.units)?;
        self.write_styled(
            &format!(
                "(min {}, max {}, stddev {}, {})",
                stat.min,
                stat.max,
                stat.std_dev,
                count_noun(stat.rounds as usize, "round")
            ),
            &scheme::detail(),
        )?;
        writeln!(self.out)
    }

    /// Write a pylint verification result.
    pub fn write_lint(&mut self, result: &LintResult) -> io::Result<()> {
        let (label, spec) = if result.is_skipped() {
            ("SKIP", scheme::warn())
        } else {
            result_label(result.result)
        };
        self.write_line(label, &spec, &result.target, &result.short_desc)
    }

    /// Write the summary line after a run.
    pub fn write_summary(&mut self, output: &RunOutput) -> io::Result<()> {
        let total = output.items.len();
        let failed = output.failed_count();

        if total == 0 {
            writeln!(self.out, "no test items found")
        } else if failed == 0 {
            writeln!(self.out, "{} passed", count_noun(total, "item"))
        } else {
            writeln!(self.out, "{failed} of {} failed", count_noun(total, "item"))
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
