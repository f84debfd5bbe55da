// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `devtester subject` command implementation.

use serde::Serialize;

use devtester::cli::{Cli, OutputFormat, SubjectArgs};
use devtester::error::ExitCode;
use devtester::output::JsonFormatter;
use devtester::resolve::subject_for_test;

#[derive(Serialize)]
struct SubjectOutput<'a> {
    test_item: &'a std::path::Path,
    subject: Option<std::path::PathBuf>,
}

/// Run the subject command.
pub fn run(cli: &Cli, args: &SubjectArgs) -> anyhow::Result<ExitCode> {
    let subject = subject_for_test(&args.test);
    let code = if subject.is_some() {
        ExitCode::Success
    } else {
        ExitCode::TestsFailed
    };

    match cli.output {
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(std::io::stdout().lock());
            formatter.write(&SubjectOutput {
                test_item: &args.test,
                subject,
            })?;
        }
        OutputFormat::Text => match subject {
            Some(path) => println!("{}", path.display()),
            None => eprintln!("no subject found for {}", args.test.display()),
        },
    }

    Ok(code)
}
