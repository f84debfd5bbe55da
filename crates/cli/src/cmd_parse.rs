// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester parse` command implementation.

use std::io::Read;

use devtester::cli::{Cli, OutputFormat, ParseArgs};
use devtester::error::{Error, ExitCode};
use devtester::output::{JsonFormatter, TextFormatter};
use devtester::parse::parse_transcript;

/// Run the parse command.
pub fn run(cli: &Cli, args: &ParseArgs) -> anyhow::Result<ExitCode> {
    let transcript = match &args.transcript {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.clone(),
            source: e,
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = parse_transcript(&args.test, &transcript)?;

    match cli.output {
        OutputFormat::Json => JsonFormatter::new(std::io::stdout().lock()).write(&result)?,
        OutputFormat::Text => {
            TextFormatter::stdout(cli.color_choice()).write_test_result(&args.test, &result)?
        }
    }

    Ok(if result.is_passed() {
        ExitCode::Success
    } else {
        ExitCode::TestsFailed
    })
}
