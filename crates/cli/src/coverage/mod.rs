// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage measurement for Python test items using coverage.py.
//!
//! Strategy:
//! 1. Resolve include/exclude filters (caller, then source directives, then
//!    the test item's subject)
//! 2. Run the test command under `coverage run`
//! 3. Export `coverage xml` and read per-file line rates from it

mod cobertura;
mod directives;
mod result;

pub use cobertura::{CoberturaReport, parse_cobertura_xml};
pub use directives::{CoverageDirectives, parse_directives, read_directives};
pub use result::{CoverageResult, ExecuteResult, execute_desc};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::process::CommandRunner;
use crate::resolve::{PACKAGE_INIT, subject_for_test};

/// Name of the exported Cobertura report inside the output directory.
pub const REPORT_FILE_NAME: &str = "coverage.xml";

/// Exit code recorded when the export step succeeded without writing a report.
const MISSING_REPORT_CODE: i32 = -1;

/// Everything needed to measure coverage for one test item.
#[derive(Debug, Clone)]
pub struct CoverageRequest {
    /// Test file being executed.
    pub test_item: PathBuf,
    /// Command that runs the test (e.g. `pytest --verbose -vv "<item>"`).
    pub command_line: String,
    /// Explicit include globs; take priority over source directives.
    pub includes: Vec<String>,
    /// Explicit exclude globs; take priority over source directives.
    pub excludes: Vec<String>,
    /// Directory that receives the exported report.
    pub output_dir: PathBuf,
}

impl CoverageRequest {
    pub fn new(
        test_item: impl Into<PathBuf>,
        command_line: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            test_item: test_item.into(),
            command_line: command_line.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            output_dir: output_dir.into(),
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }
}

/// Include/exclude filters handed to `coverage run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageFilters {
    /// The test item opted out of coverage.
    Disabled,
    Enabled {
        includes: Vec<String>,
        excludes: Vec<String>,
    },
}

/// Resolve coverage filters for a request.
pub fn resolve_filters(request: &CoverageRequest) -> Result<CoverageFilters> {
    if !request.includes.is_empty() || !request.excludes.is_empty() {
        return Ok(CoverageFilters::Enabled {
            includes: request.includes.clone(),
            excludes: request.excludes.clone(),
        });
    }

    let directives = read_directives(&request.test_item)?;
    if directives.disabled {
        return Ok(CoverageFilters::Disabled);
    }

    let mut includes: Vec<String> = directives
        .includes
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let excludes: Vec<String> = directives
        .excludes
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    if includes.is_empty()
        && excludes.is_empty()
        && let Some(subject) = subject_for_test(&request.test_item)
    {
        includes.push(module_glob(&subject));
    }

    Ok(CoverageFilters::Enabled { includes, excludes })
}

/// Build an include glob for a subject from its package path.
///
/// `src/pkg/sub/Add.py` with `__init__.py` in `pkg` and `sub` becomes
/// `*/pkg/sub/Add.py`.
pub fn module_glob(subject: &Path) -> String {
    let mut parts: Vec<String> = subject
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .into_iter()
        .collect();

    for parent in subject.ancestors().skip(1) {
        if !parent.join(PACKAGE_INIT).is_file() {
            break;
        }
        match parent.file_name() {
            Some(name) => parts.push(name.to_string_lossy().into_owned()),
            None => break,
        }
    }

    parts.reverse();
    format!("*/{}", parts.join("/"))
}

/// Build the `coverage run` command line wrapping the test command.
pub fn coverage_command_line(
    request: &CoverageRequest,
    includes: &[String],
    excludes: &[String],
) -> String {
    let mut filters = String::new();
    if !includes.is_empty() {
        filters.push_str(&format!(" \"--include={}\"", includes.join(",")));
    }
    if !excludes.is_empty() {
        filters.push_str(&format!(" \"--omit={}\"", excludes.join(",")));
    }

    if request.command_line.starts_with("python") {
        // A script invocation runs the test file directly under coverage
        format!(
            "python -m coverage run{filters} \"{}\"",
            request.test_item.display()
        )
    } else {
        format!("coverage run{filters} -m {}", request.command_line)
    }
}

/// Run a test command without coverage instrumentation.
pub fn standard_execute(
    command_line: &str,
    runner: &dyn CommandRunner,
) -> Result<(ExecuteResult, String)> {
    let start = Instant::now();
    let out = runner.run(command_line)?;
    Ok((ExecuteResult::new(out.code, start.elapsed()), out.output))
}

/// Run a test item under coverage and attach the measured coverage.
///
/// The returned result code is the test command's own exit code; a failed
/// coverage export is reported through the attached `CoverageResult`.
pub fn measure_coverage(
    request: &CoverageRequest,
    runner: &dyn CommandRunner,
) -> Result<(ExecuteResult, String)> {
    let (includes, excludes) = match resolve_filters(request)? {
        CoverageFilters::Disabled => {
            tracing::info!("coverage disabled for {}", request.test_item.display());
            return standard_execute(&request.command_line, runner);
        }
        CoverageFilters::Enabled { includes, excludes } => (includes, excludes),
    };

    let test_command = coverage_command_line(request, &includes, &excludes);
    tracing::info!("decorated command line: {test_command}");

    let test_start = Instant::now();
    let test = runner.run(&test_command)?;
    let test_duration = test_start.elapsed();

    let report = request.report_path();
    fs::create_dir_all(&request.output_dir).map_err(|e| Error::Io {
        path: request.output_dir.clone(),
        source: e,
    })?;
    // A stale report from an earlier run must not be mistaken for this one
    match fs::remove_file(&report) {
        Ok(()) => tracing::debug!("removed stale report {}", report.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::Io {
                path: report,
                source: e,
            });
        }
    }

    let coverage_start = Instant::now();
    let export = runner.run(&format!("coverage xml -o \"{}\"", report.display()));
    let (export_code, export_output) = match export {
        Ok(out) => (out.code, out.output),
        Err(e) => {
            tracing::warn!("coverage export failed: {e}");
            (MISSING_REPORT_CODE, e.to_string())
        }
    };

    let coverage = read_coverage(&report, export_code, coverage_start);
    tracing::debug!("{}: {}", request.test_item.display(), coverage.short_desc);

    let mut output = test.output;
    output.push_str("\n\n");
    output.push_str(&export_output);

    Ok((
        ExecuteResult::new(test.code, test_duration).with_coverage(coverage),
        output,
    ))
}

/// Turn the export step's outcome into a `CoverageResult`.
fn read_coverage(report: &Path, export_code: i32, start: Instant) -> CoverageResult {
    let exists = report.is_file();
    let code = if export_code == 0 && !exists {
        MISSING_REPORT_CODE
    } else {
        export_code
    };

    if code != 0 {
        let report = exists.then(|| report.to_path_buf());
        return CoverageResult::failed(code, start.elapsed(), report);
    }

    let parsed = fs::read_to_string(report)
        .map_err(|e| Error::Io {
            path: report.to_path_buf(),
            source: e,
        })
        .and_then(|xml| parse_cobertura_xml(&xml));

    match parsed {
        Ok(data) => CoverageResult::measured(
            start.elapsed(),
            report.to_path_buf(),
            data.line_rate,
            data.files,
        ),
        Err(e) => {
            tracing::warn!("unreadable coverage report {}: {e}", report.display());
            CoverageResult::failed(
                MISSING_REPORT_CODE,
                start.elapsed(),
                Some(report.to_path_buf()),
            )
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
