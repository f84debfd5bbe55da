// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Devtester CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use devtester::cli::{Cli, Command};
use devtester::config::{self, Config};
use devtester::discovery;
use devtester::env;
use devtester::error::ExitCode;

mod cmd_lint;
mod cmd_parse;
mod cmd_run;
mod cmd_subject;

fn init_logging() {
    let filter = EnvFilter::try_from_env(env::names::DEVTESTER_LOG)
        .unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("devtester: {}", e);
            match e.downcast_ref::<devtester::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Subject(args)) => cmd_subject::run(&cli, args),
        Some(Command::Parse(args)) => cmd_parse::run(&cli, args),
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
        Some(Command::Lint(args)) => cmd_lint::run(&cli, args),
    }
}

/// Load the config named by `-C`, or the nearest devtester.toml.
pub(crate) fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    let path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    Ok(config::load_or_default(path.as_deref())?)
}
