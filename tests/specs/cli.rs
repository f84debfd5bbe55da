// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level command line behavior.

use crate::prelude::*;

#[test]
fn bare_invocation_shows_help() {
    devtester(&[])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("parse")
        .stdout_has("subject")
        .stdout_has("lint");
}

#[test]
fn help_lists_global_options() {
    devtester(&["--help"])
        .passes()
        .stdout_has("--config")
        .stdout_has("--output")
        .stdout_has("--no-color");
}

#[test]
fn version_prints_package_version() {
    devtester(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    devtester(&["frobnicate"])
        .exits(2)
        .stderr_has("unrecognized subcommand");
}

#[test]
fn invalid_output_format_is_rejected() {
    devtester(&["parse", "x.py", "-o", "yaml"])
        .exits(2)
        .stderr_has("invalid value");
}
