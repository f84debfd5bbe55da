// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester lint` command implementation.

use devtester::cli::{Cli, LintArgs, OutputFormat};
use devtester::config::check_passing_score;
use devtester::error::{Error, ExitCode};
use devtester::lint::verify;
use devtester::output::{JsonFormatter, TextFormatter};
use devtester::process::ShellRunner;

/// Run the lint command.
pub fn run(cli: &Cli, args: &LintArgs) -> anyhow::Result<ExitCode> {
    let config = crate::load_config(cli)?;

    let mut lint = config.lint.clone();
    if let Some(score) = args.passing_score {
        check_passing_score(score).map_err(Error::Argument)?;
        lint.passing_score = Some(score);
    }

    let runner = ShellRunner::new().with_timeout(config.test.timeout);
    let result = verify(&args.file, &lint, &runner)?;

    match cli.output {
        OutputFormat::Json => JsonFormatter::new(std::io::stdout().lock()).write(&result)?,
        OutputFormat::Text => TextFormatter::stdout(cli.color_choice()).write_lint(&result)?,
    }

    Ok(if result.result == 0 {
        ExitCode::Success
    } else {
        ExitCode::TestsFailed
    })
}
