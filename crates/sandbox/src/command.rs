// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized description of a child process.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// A command for the sandbox runner to execute.
///
/// Wire form is a single JSON object:
///
/// ```json
/// {"path": "/usr/bin/scan", "args": ["-mode", "source"], "dir": "/work",
///  "env": ["HOME=/work"], "append_to_env": true}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxCommand {
    /// Program to execute
    pub path: PathBuf,
    /// Arguments, not including the program itself
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory; empty means the runner's own
    #[serde(default)]
    pub dir: PathBuf,
    /// `KEY=VALUE` entries
    #[serde(default)]
    pub env: Vec<String>,
    /// Append `env` to the runner's inherited environment instead of
    /// using it as the complete environment.
    #[serde(default)]
    pub append_to_env: bool,
}

impl SandboxCommand {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.env.push(format!("{key}={}", value.as_ref()));
        self
    }

    pub fn append_to_env(mut self, append: bool) -> Self {
        self.append_to_env = append;
        self
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.path.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Resolve the environment the child will see.
    ///
    /// With `append_to_env` the result is `inherited` followed by `env`;
    /// otherwise only `env`. Later assignments to the same name replace
    /// earlier ones in place. Entries without `=` are dropped.
    pub fn effective_env<I>(&self, inherited: I) -> Vec<(OsString, OsString)>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut merged: IndexMap<OsString, OsString> = IndexMap::new();
        if self.append_to_env {
            merged.extend(inherited);
        }
        for entry in &self.env {
            match entry.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    merged.insert(key.into(), value.into());
                }
                _ => tracing::warn!(entry = %entry, "ignoring malformed environment entry"),
            }
        }
        merged.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
