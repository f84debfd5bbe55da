// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for devtester.toml.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Find devtester.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        // Stop at git root
        if dir.join(".git").exists() {
            return None;
        }
    }
    None
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "DEVTESTER_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(cwd)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
