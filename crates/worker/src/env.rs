// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker crate.

use std::path::PathBuf;
use std::time::Duration;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Optional TOML file layered under the environment (`MODSCAN_CONFIG`)
pub fn config_path() -> Option<PathBuf> {
    non_empty("MODSCAN_CONFIG").map(PathBuf::from)
}

/// Root of the binary store. Binary-mode scans are disabled when unset.
pub fn binary_dir() -> Option<PathBuf> {
    non_empty("MODSCAN_BINARY_DIR").map(PathBuf::from)
}

/// Directory of the file job store. Job requests fail when unset.
pub fn jobs_dir() -> Option<PathBuf> {
    non_empty("MODSCAN_JOBS_DIR").map(PathBuf::from)
}

/// Path to the `modscan-runner` binary
pub fn runner() -> Option<PathBuf> {
    non_empty("MODSCAN_RUNNER").map(PathBuf::from)
}

/// Scan tool executed inside the sandbox
pub fn scan_tool() -> Option<PathBuf> {
    non_empty("MODSCAN_SCAN_TOOL").map(PathBuf::from)
}

/// JSON-lines vulnerability table
pub fn vulndb_path() -> Option<PathBuf> {
    non_empty("MODSCAN_VULNDB_PATH").map(PathBuf::from)
}

/// Per-scan timeout (`MODSCAN_SCAN_TIMEOUT_MS`)
pub fn scan_timeout() -> Option<Duration> {
    non_empty("MODSCAN_SCAN_TIMEOUT_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
