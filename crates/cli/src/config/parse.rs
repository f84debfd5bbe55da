// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unknown key detection for configuration.

use std::path::Path;

/// Known sections and the keys each accepts.
const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    ("test", &["test_type", "timeout"]),
    ("coverage", &["output_dir", "enabled"]),
    ("lint", &["passing_score"]),
];

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "test", "coverage", "lint"];

/// Collect dotted paths of unrecognized keys, each with a suggested fix.
pub(super) fn unknown_keys(table: &toml::Table) -> Vec<(String, Option<&'static str>)> {
    let mut unknown = Vec::new();

    for (key, value) in table {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown.push((key.clone(), suggest_key(key, KNOWN_KEYS)));
            continue;
        }

        let Some((_, keys)) = KNOWN_SECTIONS.iter().find(|(name, _)| name == key) else {
            continue;
        };
        if let toml::Value::Table(section) = value {
            for field in section.keys() {
                if !keys.contains(&field.as_str()) {
                    unknown.push((format!("{key}.{field}"), suggest_key(field, keys)));
                }
            }
        }
    }

    unknown
}

/// Suggest a known key for a typo.
pub(super) fn suggest_key(unknown: &str, known: &[&'static str]) -> Option<&'static str> {
    // Require at least 2 chars to avoid false positives
    if unknown.len() < 2 {
        return None;
    }

    let lower = unknown.to_lowercase();
    known
        .iter()
        .copied()
        .find(|name| name.starts_with(lower.as_str()) || lower.starts_with(name))
}

/// Warn about an unrecognized config field.
pub(super) fn warn_unknown_key(path: &Path, key: &str, suggestion: Option<&str>) {
    match suggestion {
        Some(suggested) => eprintln!(
            "devtester: warning: {}: unrecognized field `{}` (ignored). Did you mean `{}`?",
            path.display(),
            key,
            suggested
        ),
        None => eprintln!(
            "devtester: warning: {}: unrecognized field `{}` (ignored)",
            path.display(),
            key
        ),
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
