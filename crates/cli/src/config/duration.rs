// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration strings for test command time limits.
//!
//! Supports `"500ms"`, `"30s"`, `"1.5s"`, `"2m"` and `"1h"`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Unit suffixes with their length in milliseconds; `ms` precedes `m` and `s`.
const UNITS: &[(&str, f64)] = &[
    ("ms", 1.0),
    ("s", 1_000.0),
    ("m", 60_000.0),
    ("h", 3_600_000.0),
];

/// Parse a duration string into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let Some((value, scale)) = UNITS
        .iter()
        .find_map(|(suffix, scale)| s.strip_suffix(suffix).map(|v| (v.trim(), *scale)))
    else {
        return Err(format!(
            "invalid duration format: {s} (use 500ms, 30s, 2m or 1h)"
        ));
    };

    let n: f64 = value
        .parse()
        .map_err(|_| format!("invalid duration: {s}"))?;
    if !n.is_finite() || n < 0.0 {
        return Err(format!("invalid duration: {s}"));
    }

    Ok(Duration::from_secs_f64(n * scale / 1_000.0))
}

/// Deserialize an optional duration string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
