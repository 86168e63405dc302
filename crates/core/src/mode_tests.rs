// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ErrorKind;

#[yare::parameterized(
    binary = { "binary", AnalysisMode::Binary },
    source = { "source", AnalysisMode::Source },
    upper = { "BINARY", AnalysisMode::Binary },
    padded = { " source ", AnalysisMode::Source },
)]
fn parses_known_modes(input: &str, expected: AnalysisMode) {
    assert_eq!(input.parse::<AnalysisMode>().unwrap(), expected);
}

#[yare::parameterized(
    imports = { "imports" },
    empty = { "" },
    typo = { "sorce" },
)]
fn rejects_unknown_modes(input: &str) {
    let err = input.parse::<AnalysisMode>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn canonical_order_puts_binary_first() {
    let mut modes = vec![AnalysisMode::Source, AnalysisMode::Binary];
    modes.sort();
    assert_eq!(modes, AnalysisMode::ALL);
}

#[test]
fn display_matches_wire_name() {
    for mode in AnalysisMode::ALL {
        assert_eq!(mode.to_string(), mode.as_str());
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{}\"", mode.as_str()));
    }
}

#[test]
fn only_binary_needs_binary_store() {
    assert!(AnalysisMode::Binary.requires_binary_store());
    assert!(!AnalysisMode::Source.requires_binary_store());
}
