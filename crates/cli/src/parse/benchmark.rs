// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pytest-benchmark table parsing.
//!
//! Table format:
//! ```text
//! ------------------------- benchmark: 2 tests -------------------------
//! Name (time in us)     Min     Max    Mean  StdDev  Median     IQR  Outliers  OPS (Kops/s)  Rounds  Iterations
//! ----------------------------------------------------------------------
//! test_add       1.0000 (1.0)  2.0000 (1.0)  ...          0;0  666.6667 (1.0)      5         100
//! test_sub       1.2000 (1.20) 2.4000 (1.20) ...          1;2  555.5556 (0.83)     5         100
//! ----------------------------------------------------------------------
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::result::{BenchmarkStat, Units};
use crate::error::{Error, Result};

/// Placeholder line number; pytest-benchmark doesn't report source lines.
const UNKNOWN_LINE: u32 = 1;

#[allow(clippy::expect_used)]
static TABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"-{4,} benchmark: \d+ tests? -{4,}\r?\n",
        r"Name \(time in (?P<units>\S+)\)\s+",
        r"Min\s+Max\s+Mean\s+StdDev\s+Median\s+IQR\s+Outliers\s+",
        r"OPS(?: \([^)]*\))?\s+Rounds\s+Iterations\r?\n",
        r"-{4,}\r?\n",
        r"(?P<content>(?s:.+?))\r?\n",
        r"-{4,}(?:\r?\n|$)",
    ))
    .expect("valid regex")
});

#[allow(clippy::expect_used)]
static LINE_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Each statistic may be followed by its deviation from the best result,
    // e.g. "1.0000 (1.0)" or "12.5000 (>1000.0)".
    let stat = |name: &str| format!(r"(?P<{name}>{FLOAT})(?:\s+\(>?{FLOAT}\))?");
    let pattern = format!(
        r"^(?P<name>\S+)\s+{}\s+{}\s+{}\s+{}\s+{}\s+{}\s+(?P<outliers_low>\d+);(?P<outliers_high>\d+)\s+{}\s+(?P<rounds>\d+)\s+(?P<iterations>\d+)$",
        stat("min"),
        stat("max"),
        stat("mean"),
        stat("std_dev"),
        stat("median"),
        stat("iqr"),
        stat("ops"),
    );
    Regex::new(&pattern).expect("valid regex")
});

#[allow(clippy::expect_used)]
static PYTHON_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Python (?P<value>\d+\.\d+\.\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static PYTEST_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<value>pytest-\d+\.\d+\.\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static BENCHMARK_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<value>benchmark-\d+\.\d+\.\d+)").expect("valid regex"));

/// Number pattern with optional thousands separators.
const FLOAT: &str = r"[\d,]+(?:\.\d+)?";

/// Parse the benchmark table out of a pytest transcript.
///
/// Returns an empty list when the transcript has no benchmark table. A table
/// whose body doesn't follow the pytest-benchmark layout is a format error.
pub fn parse_benchmarks(transcript: &str, source_file: &Path) -> Result<Vec<BenchmarkStat>> {
    let Some(table) = TABLE_PATTERN.captures(transcript) else {
        return Ok(Vec::new());
    };

    let units: Units = table["units"].parse().map_err(Error::Format)?;
    let version = version_descriptor(transcript)?;

    let mut stats = Vec::new();
    for line in table["content"].lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.push(parse_line_item(line, source_file, &version, units)?);
    }

    tracing::debug!(
        "parsed {} benchmark(s) from {}",
        stats.len(),
        source_file.display()
    );
    Ok(stats)
}

/// Parse one body line of the benchmark table.
fn parse_line_item(
    line: &str,
    source_file: &Path,
    version: &str,
    units: Units,
) -> Result<BenchmarkStat> {
    let caps = LINE_ITEM_PATTERN
        .captures(line)
        .ok_or_else(|| Error::Format(format!("unrecognized benchmark line: {line}")))?;

    Ok(BenchmarkStat {
        name: caps["name"].to_string(),
        source_file: source_file.to_path_buf(),
        line: UNKNOWN_LINE,
        version: version.to_string(),
        min: parse_number(&caps["min"])?,
        max: parse_number(&caps["max"])?,
        mean: parse_number(&caps["mean"])?,
        std_dev: parse_number(&caps["std_dev"])?,
        rounds: parse_count(&caps["rounds"])?,
        units,
        iterations: parse_count(&caps["iterations"])?,
    })
}

/// Build `<python> / pytest-x.y.z / benchmark-x.y.z` from the transcript.
fn version_descriptor(transcript: &str) -> Result<String> {
    let python = find_value(&PYTHON_VERSION_PATTERN, transcript).unwrap_or("unknown");

    let pytest = find_value(&PYTEST_VERSION_PATTERN, transcript)
        .ok_or_else(|| Error::Format("benchmark output without a pytest version".into()))?;
    let benchmark = find_value(&BENCHMARK_VERSION_PATTERN, transcript).ok_or_else(|| {
        Error::Format("benchmark output without a pytest-benchmark version".into())
    })?;

    Ok(format!("{python} / {pytest} / {benchmark}"))
}

fn find_value<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|c| c.name("value"))
        .map(|m| m.as_str())
}

/// Parse a number that may contain thousands separators ("1,234.5").
pub(crate) fn parse_number(s: &str) -> Result<f64> {
    s.replace(',', "")
        .parse::<f64>()
        .map_err(|e| Error::Format(format!("invalid number {s:?}: {e}")))
}

fn parse_count(s: &str) -> Result<u64> {
    s.parse::<u64>()
        .map_err(|e| Error::Format(format!("invalid count {s:?}: {e}")))
}

#[cfg(test)]
#[path = "benchmark_tests.rs"]
mod tests;
