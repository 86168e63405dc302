// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Analysis modes a scan task can run in.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of analysis modes.
///
/// Declaration order is the canonical order used whenever "all modes" are
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Scan a prebuilt binary. Needs a configured binary store.
    Binary,
    /// Scan module source. The default mode.
    Source,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 2] = [AnalysisMode::Binary, AnalysisMode::Source];

    pub const DEFAULT: AnalysisMode = AnalysisMode::Source;

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Binary => "binary",
            AnalysisMode::Source => "source",
        }
    }

    /// Whether tasks in this mode need the binary store to exist.
    pub fn requires_binary_store(self) -> bool {
        matches!(self, AnalysisMode::Binary)
    }
}

impl FromStr for AnalysisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AnalysisMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_argument(format!("unsupported mode: {s:?}")))
    }
}

crate::simple_display! {
    AnalysisMode {
        Binary => "binary",
        Source => "source",
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
