// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan tasks and the population records they are built from.

use crate::mode::AnalysisMode;
use serde::{Deserialize, Serialize};

/// Pseudo-module for the standard library; never scheduled.
pub const STD_MODULE: &str = "std";

/// One population entry: a module at its resolved version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub path: String,
    pub version: String,
    /// Number of importers, used for prioritization and reporting
    pub imported_by: u64,
}

impl ModuleSpec {
    pub fn new(path: impl Into<String>, version: impl Into<String>, imported_by: u64) -> Self {
        Self { path: path.into(), version: version.into(), imported_by }
    }
}

/// A prebuilt binary available in the binary store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BinarySpec {
    pub module: String,
    pub version: String,
    /// Path of the binary's main package within the module
    pub suffix: String,
}

/// One unit of scheduled work.
///
/// Identity is `(module, version, suffix, mode)`; `imported_by` is
/// scheduling metadata and does not take part in equality of identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTask {
    pub module: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub mode: AnalysisMode,
    #[serde(default)]
    pub imported_by: u64,
}

impl ScanTask {
    pub fn source(spec: &ModuleSpec) -> Self {
        Self {
            module: spec.path.clone(),
            version: spec.version.clone(),
            suffix: None,
            mode: AnalysisMode::Source,
            imported_by: spec.imported_by,
        }
    }

    pub fn binary(spec: &BinarySpec) -> Self {
        Self {
            module: spec.module.clone(),
            version: spec.version.clone(),
            suffix: Some(spec.suffix.clone()).filter(|s| !s.is_empty()),
            mode: AnalysisMode::Binary,
            imported_by: 0,
        }
    }

    /// `module@version` or `module@version/suffix`
    pub fn target(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}@{}/{}", self.module, self.version, suffix),
            None => format!("{}@{}", self.module, self.version),
        }
    }

    /// Queue-safe idempotency key: `module@version[@suffix]:mode`.
    ///
    /// Each field is percent-encoded outside `[A-Za-z0-9._-]`, so the
    /// separators never occur inside a field and two tasks share a key
    /// exactly when their identities are equal.
    pub fn key(&self) -> String {
        let mut key = escape_key_field(&self.module);
        key.push('@');
        key.push_str(&escape_key_field(&self.version));
        if let Some(suffix) = &self.suffix {
            key.push('@');
            key.push_str(&escape_key_field(suffix));
        }
        key.push(':');
        key.push_str(self.mode.as_str());
        key
    }
}

fn escape_key_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for byte in field.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

impl std::fmt::Display for ScanTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.target(), self.mode)
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
