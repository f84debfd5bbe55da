// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default:
//!    - If not stdout.is_tty() → no color
//!    - If CI env var set → no color
//!    - Else → auto

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::env;

/// Resolve color choice from CLI flags and environment variables.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color(force: bool, disable: bool) -> ColorChoice {
    if disable {
        return ColorChoice::Never;
    }
    if force {
        return ColorChoice::Always;
    }
    if env::no_color() {
        return ColorChoice::Never;
    }
    if env::color() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || env::ci() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for result output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    fn bold(color: Color) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(true);
        spec
    }

    /// Green "PASS" indicator.
    pub fn pass() -> ColorSpec {
        bold(Color::Green)
    }

    /// Red "FAIL" indicator.
    pub fn fail() -> ColorSpec {
        bold(Color::Red)
    }

    /// Yellow "INVALID" indicator for unparseable output.
    pub fn invalid() -> ColorSpec {
        bold(Color::Yellow)
    }

    /// Yellow "WARN" / "SKIP" indicator.
    pub fn warn() -> ColorSpec {
        bold(Color::Yellow)
    }

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Dimmed detail text (durations, benchmark figures).
    pub fn detail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
