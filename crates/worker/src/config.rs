// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker configuration.
//!
//! Resolution order, lowest to highest: built-in defaults, the TOML file
//! named by `MODSCAN_CONFIG`, then individual `MODSCAN_*` variables.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use modscan_core::{Error, Result};
use modscan_sandbox::Sandbox;
use modscan_storage::{FileJobStore, JobStore, JsonlVulnTable};
use serde::Deserialize;

use crate::binaries::DirBinaryStore;
use crate::env;

pub const DEFAULT_RUNNER: &str = "modscan-runner";
pub const DEFAULT_SCAN_TOOL: &str = "vulncheck";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the binary store; `None` disables binary-mode scans
    pub binary_dir: Option<PathBuf>,
    /// File job store directory; `None` leaves job requests unimplemented
    pub jobs_dir: Option<PathBuf>,
    pub runner: PathBuf,
    pub scan_tool: PathBuf,
    pub vulndb_path: Option<PathBuf>,
    pub scan_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary_dir: None,
            jobs_dir: None,
            runner: PathBuf::from(DEFAULT_RUNNER),
            scan_tool: PathBuf::from(DEFAULT_SCAN_TOOL),
            vulndb_path: None,
            scan_timeout: None,
        }
    }
}

/// On-disk shape; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    binary_dir: Option<PathBuf>,
    jobs_dir: Option<PathBuf>,
    runner: Option<PathBuf>,
    scan_tool: Option<PathBuf>,
    vulndb_path: Option<PathBuf>,
    scan_timeout_ms: Option<u64>,
}

impl Config {
    modscan_core::setters! {
        into {
            runner: PathBuf,
            scan_tool: PathBuf,
        }
        option {
            binary_dir: PathBuf,
            jobs_dir: PathBuf,
            vulndb_path: PathBuf,
            scan_timeout: Duration,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(dir) = env::binary_dir() {
            config.binary_dir = Some(dir);
        }
        if let Some(dir) = env::jobs_dir() {
            config.jobs_dir = Some(dir);
        }
        if let Some(runner) = env::runner() {
            config.runner = runner;
        }
        if let Some(tool) = env::scan_tool() {
            config.scan_tool = tool;
        }
        if let Some(path) = env::vulndb_path() {
            config.vulndb_path = Some(path);
        }
        if let Some(timeout) = env::scan_timeout() {
            config.scan_timeout = Some(timeout);
        }
        Ok(config)
    }

    /// Defaults overlaid with the keys present in a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_argument(format!("reading config {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
            .map_err(|e| Error::invalid_argument(format!("config {}: {e}", path.display())))
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            binary_dir: file.binary_dir,
            jobs_dir: file.jobs_dir,
            runner: file.runner.unwrap_or(defaults.runner),
            scan_tool: file.scan_tool.unwrap_or(defaults.scan_tool),
            vulndb_path: file.vulndb_path,
            scan_timeout: file.scan_timeout_ms.map(Duration::from_millis),
        })
    }

    /// The binary store, if one is configured.
    pub fn binary_store(&self) -> Option<DirBinaryStore> {
        self.binary_dir.as_ref().map(DirBinaryStore::new)
    }

    /// Open the file job store, if one is configured.
    pub async fn job_store(&self) -> Result<Option<Arc<dyn JobStore>>> {
        match &self.jobs_dir {
            Some(dir) => {
                let store = FileJobStore::open(dir).await?;
                Ok(Some(Arc::new(store)))
            }
            None => Ok(None),
        }
    }

    pub fn vuln_table(&self) -> Option<JsonlVulnTable> {
        self.vulndb_path.as_ref().map(JsonlVulnTable::new)
    }

    /// Sandbox client launching the configured runner.
    pub fn sandbox(&self) -> Sandbox {
        let sandbox = Sandbox::new(&self.runner);
        match self.scan_timeout {
            Some(timeout) => sandbox.with_timeout(timeout),
            None => sandbox,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
