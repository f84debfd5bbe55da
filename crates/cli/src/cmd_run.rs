// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester run` command implementation.

use devtester::cli::{Cli, OutputFormat, RunArgs};
use devtester::config::check_test_type;
use devtester::error::{Error, ExitCode};
use devtester::output::{JsonFormatter, TextFormatter};
use devtester::process::ShellRunner;
use devtester::resolve::singularize;
use devtester::runner::{RunnerConfig, TestRunner};
use devtester::walker::discover_test_items;

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let config = crate::load_config(cli)?;

    let test_type = match &args.test_type {
        Some(t) => singularize(t).to_string(),
        None => config.test.test_type.clone(),
    };
    check_test_type(&test_type).map_err(Error::Argument)?;

    let items = discover_test_items(&args.path, &test_type)?;
    tracing::debug!("running {} test item(s)", items.len());

    let coverage = args.coverage || config.coverage.enabled;
    let runner_config = RunnerConfig {
        coverage_dir: coverage.then(|| config.coverage.output_dir.clone()),
        jobs: args.jobs.unwrap_or(0),
        root: args.path.clone(),
    };

    let shell = ShellRunner::new().with_timeout(config.test.timeout);
    let output = TestRunner::new(&shell, runner_config).run_all(&items)?;

    match cli.output {
        OutputFormat::Json => JsonFormatter::new(std::io::stdout().lock()).write(&output)?,
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(cli.color_choice());
            for item in &output.items {
                formatter.write_item(item)?;
            }
            formatter.write_summary(&output)?;
        }
    }

    Ok(if output.passed {
        ExitCode::Success
    } else {
        ExitCode::TestsFailed
    })
}
