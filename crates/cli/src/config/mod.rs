// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles devtester.toml parsing with version validation and unknown key warnings.

mod duration;
mod parse;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use duration::parse_duration;

use crate::error::{Error, Result};
use parse::{unknown_keys, warn_unknown_key};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "devtester.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Passing pylint score when none is configured.
pub const DEFAULT_PASSING_SCORE: f64 = 9.0;

/// Highest score pylint reports.
pub const MAX_PASSING_SCORE: f64 = 10.0;

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Test execution settings.
    #[serde(default)]
    pub test: TestConfig,

    /// Coverage measurement settings.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Pylint verification settings.
    #[serde(default)]
    pub lint: LintConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            test: TestConfig::default(),
            coverage: CoverageConfig::default(),
            lint: LintConfig::default(),
        }
    }
}

impl Config {
    fn validate(&self, path: &Path) -> Result<()> {
        check_test_type(&self.test.test_type).map_err(|message| Error::Config {
            message,
            path: Some(path.to_path_buf()),
        })?;
        check_passing_score(self.lint.passing_score()).map_err(|message| Error::Config {
            message,
            path: Some(path.to_path_buf()),
        })
    }
}

/// `[test]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Test type tag of the items to run (`UnitTest`).
    pub test_type: String,

    /// Limit for a single test command (None = no limit).
    #[serde(deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            test_type: "UnitTest".to_string(),
            timeout: None,
        }
    }
}

/// `[coverage]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Directory receiving exported coverage reports.
    pub output_dir: PathBuf,

    /// Measure coverage on every run, as if `--coverage` were passed.
    pub enabled: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".devtester"),
            enabled: false,
        }
    }
}

/// `[lint]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Lowest passing pylint score (None = default of 9.0).
    pub passing_score: Option<f64>,
}

impl LintConfig {
    pub fn passing_score(&self) -> f64 {
        self.passing_score.unwrap_or(DEFAULT_PASSING_SCORE)
    }

    /// Whether the passing score was supplied rather than defaulted.
    pub fn is_explicit(&self) -> bool {
        self.passing_score.is_some()
    }
}

/// Check that a test type tag can name test items (`UnitTest`, `IntegrationTest`).
pub fn check_test_type(test_type: &str) -> std::result::Result<(), String> {
    let valid = test_type.len() > "Test".len()
        && test_type.ends_with("Test")
        && !test_type.contains(['_', '.']);
    if valid {
        Ok(())
    } else {
        Err(format!(
            "invalid test type `{test_type}` (expected a name ending in `Test`, e.g. UnitTest)"
        ))
    }
}

/// Check that a passing score is within pylint's range.
pub fn check_passing_score(score: f64) -> std::result::Result<(), String> {
    if (0.0..=MAX_PASSING_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(format!(
            "passing score {score} out of range (0 to {MAX_PASSING_SCORE})"
        ))
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config from an optional path, falling back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load(path)
        }
        None => {
            tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parse config, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |e: toml::de::Error| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(config_error)?;
    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {version} (supported: {SUPPORTED_VERSION})\n  Upgrade devtester to use this config."
            ),
            path: Some(path.to_path_buf()),
        });
    }

    let table: toml::Table = toml::from_str(content).map_err(config_error)?;
    for (key, suggestion) in unknown_keys(&table) {
        warn_unknown_key(path, &key, suggestion);
    }

    let config: Config = toml::from_str(content).map_err(config_error)?;
    config.validate(path)?;
    Ok(config)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
