// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use modscan_core::test_support::source_task;
use modscan_core::{BinarySpec, ErrorKind};

struct FixedBinaries(Vec<BinarySpec>);

impl BinaryStore for FixedBinaries {
    fn list(&self) -> Result<Vec<BinarySpec>> {
        Ok(self.0.clone())
    }
}

fn population() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::new("github.com/pkg/errors", "v0.9.1", 10),
        ModuleSpec::new(STD_MODULE, "v1.21.0", 1000),
        ModuleSpec::new("golang.org/x/net", "v0.4.0", 20),
        ModuleSpec::new("github.com/pkg/errors", "v0.9.1", 10),
    ]
}

fn binaries() -> FixedBinaries {
    FixedBinaries(vec![BinarySpec {
        module: "golang.org/x/tools".into(),
        version: "v0.5.0".into(),
        suffix: "cmd/stringer".into(),
    }])
}

#[yare::parameterized(
    empty_all = { "", true, &[AnalysisMode::Binary, AnalysisMode::Source] },
    empty_default = { "", false, &[AnalysisMode::Source] },
    single = { "binary", false, &[AnalysisMode::Binary] },
    request_order = { "source,binary", true, &[AnalysisMode::Source, AnalysisMode::Binary] },
    trimmed_and_cased = { " Source , BINARY ", false, &[AnalysisMode::Source, AnalysisMode::Binary] },
    repeats_dropped = { "source,source", false, &[AnalysisMode::Source] },
)]
fn selects_modes(requested: &str, allow_all: bool, expected: &[AnalysisMode]) {
    assert_eq!(select_modes(requested, allow_all).unwrap(), expected);
}

#[yare::parameterized(
    unknown = { "imports" },
    one_bad = { "source,imports" },
    empty_item = { "source," },
)]
fn rejects_unknown_modes(requested: &str) {
    let err = select_modes(requested, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn source_tasks_follow_population_without_std_or_repeats() {
    let got = build_tasks(&population(), &[AnalysisMode::Source], None).unwrap();
    assert_eq!(
        got,
        vec![
            source_task("github.com/pkg/errors", "v0.9.1", 10),
            source_task("golang.org/x/net", "v0.4.0", 20),
        ]
    );
}

#[test]
fn binary_mode_without_store_is_silently_skipped() {
    let source_only = build_tasks(&population(), &[AnalysisMode::Source], None).unwrap();
    let got = build_tasks(&population(), &AnalysisMode::ALL, None).unwrap();
    similar_asserts::assert_eq!(got, source_only);
}

#[test]
fn binary_tasks_come_from_the_store_in_mode_order() {
    let store = binaries();
    let got = build_tasks(&population(), &AnalysisMode::ALL, Some(&store)).unwrap();

    let targets: Vec<_> = got.iter().map(|t| (t.mode, t.target())).collect();
    assert_eq!(
        targets,
        vec![
            (AnalysisMode::Binary, "golang.org/x/tools@v0.5.0/cmd/stringer".to_string()),
            (AnalysisMode::Source, "github.com/pkg/errors@v0.9.1".to_string()),
            (AnalysisMode::Source, "golang.org/x/net@v0.4.0".to_string()),
        ]
    );
}

#[test]
fn binary_only_ignores_population() {
    let store = binaries();
    let got = build_tasks(&population(), &[AnalysisMode::Binary], Some(&store)).unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].mode, AnalysisMode::Binary);
}
