// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by devtester.

/// Variable names, generated by the build script.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// `NO_COLOR` is set, to any value including empty.
pub fn no_color() -> bool {
    std::env::var_os(names::NO_COLOR).is_some()
}

/// `COLOR` is set.
pub fn color() -> bool {
    std::env::var_os(names::COLOR).is_some()
}

/// Running under CI.
pub fn ci() -> bool {
    std::env::var_os(names::CI).is_some()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
