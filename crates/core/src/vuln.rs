// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability database entries and the upstream advisory format.
//!
//! [`Advisory`] mirrors the upstream (OSV-style) schema as published.
//! [`VulnEntry`] is the flattened row shape stored in the vulnerability
//! table and handed to scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream advisory record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected: Vec<Affected>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affected {
    pub module: AffectedModule,
    #[serde(default)]
    pub ranges: Vec<Range>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedModule {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    #[serde(default)]
    pub events: Vec<RangeEvent>,
}

/// A single `introduced` or `fixed` event; usually only one side is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEvent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub introduced: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fixed: String,
}

/// Row of the vulnerability table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnEntry {
    pub id: String,
    /// `None` when the upstream entry carried no modification time; such
    /// rows are older than any row with a time.
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modules: Vec<VulnModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnModule {
    pub path: String,
    #[serde(default)]
    pub ranges: Vec<VulnRange>,
}

/// An `introduced`/`fixed` pair. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnRange {
    #[serde(default)]
    pub introduced: String,
    #[serde(default)]
    pub fixed: String,
}

impl From<&RangeEvent> for VulnRange {
    fn from(e: &RangeEvent) -> Self {
        Self { introduced: e.introduced.clone(), fixed: e.fixed.clone() }
    }
}

/// Flatten an upstream advisory into a table row.
///
/// Each affected entry becomes one [`VulnModule`], in order. Its ranges are
/// the events of all upstream ranges concatenated in order, one
/// [`VulnRange`] per event; nothing is merged or sorted.
pub fn convert(advisory: &Advisory) -> VulnEntry {
    VulnEntry {
        id: advisory.id.clone(),
        modified_time: advisory.modified,
        modules: advisory
            .affected
            .iter()
            .map(|a| VulnModule {
                path: a.module.path.clone(),
                ranges: a.ranges.iter().flat_map(|r| r.events.iter()).map(VulnRange::from).collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "vuln_tests.rs"]
mod tests;
