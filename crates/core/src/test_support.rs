// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::task::{ModuleSpec, ScanTask};
use crate::vuln::VulnEntry;
use chrono::{DateTime, TimeZone, Utc};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::vuln::{Advisory, Affected, AffectedModule, Range, RangeEvent};
    use proptest::prelude::*;

    fn arb_version() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[0-9]\\.[0-9]{1,2}\\.[0-9]"]
    }

    pub fn arb_range_event() -> impl Strategy<Value = RangeEvent> {
        (arb_version(), arb_version()).prop_map(|(introduced, fixed)| RangeEvent { introduced, fixed })
    }

    pub fn arb_affected() -> impl Strategy<Value = Affected> {
        (
            "[a-z]{1,8}\\.[a-z]{2,3}/[a-z]{1,6}",
            prop::collection::vec(
                prop::collection::vec(arb_range_event(), 0..4).prop_map(|events| Range { events }),
                0..3,
            ),
        )
            .prop_map(|(path, ranges)| Affected { module: AffectedModule { path }, ranges })
    }

    pub fn arb_advisory() -> impl Strategy<Value = Advisory> {
        ("[A-Z]{2,4}-[0-9]{4}-[0-9]{4}", prop::collection::vec(arb_affected(), 0..5))
            .prop_map(|(id, affected)| Advisory { id, modified: None, affected })
    }
}

// ── Factories ───────────────────────────────────────────────────────────

/// Timestamp `secs` seconds after 2024-01-01T00:00:00Z.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200 + secs, 0).single().unwrap_or_default()
}

pub fn vuln_row(id: &str, modified: Option<DateTime<Utc>>) -> VulnEntry {
    VulnEntry { id: id.to_string(), modified_time: modified, modules: Vec::new() }
}

pub fn source_task(path: &str, version: &str, imported_by: u64) -> ScanTask {
    ScanTask::source(&ModuleSpec::new(path, version, imported_by))
}
