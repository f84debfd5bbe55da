// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Colored output follows the flags, then NO_COLOR and COLOR.

use crate::prelude::*;

const ESC: &str = "\x1b[";

fn parse_passing() -> Builder {
    devtester(&["parse", "Add_UnitTest.py"]).stdin(transcript("passing"))
}

#[test]
fn no_color_env_disables_color() {
    parse_passing().passes().stdout_lacks(ESC);
}

#[test]
fn color_flag_forces_color() {
    parse_passing()
        .args(&["--color"])
        .passes()
        .stdout_has(ESC)
        .stdout_has("PASS");
}

#[test]
fn no_color_flag_beats_color_flag() {
    parse_passing()
        .args(&["--color", "--no-color"])
        .passes()
        .stdout_lacks(ESC);
}

#[test]
fn color_env_enables_color_without_no_color() {
    let output = {
        let mut cmd = devtester_cmd();
        cmd.env_remove("NO_COLOR")
            .env("COLOR", "1")
            .args(["parse", "Add_UnitTest.py", "--transcript"])
            .arg(fixture("transcripts/passing.txt"));
        cmd.output().unwrap()
    };
    assert!(String::from_utf8_lossy(&output.stdout).contains(ESC));
}

#[test]
fn json_is_never_colored() {
    parse_passing()
        .args(&["--color"])
        .json()
        .passes()
        .stdout_lacks(ESC);
}
