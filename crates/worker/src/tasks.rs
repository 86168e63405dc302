// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mode selection and task expansion.

use indexmap::IndexMap;
use modscan_core::{AnalysisMode, ModuleSpec, Result, ScanTask, STD_MODULE};

use crate::binaries::BinaryStore;

/// Resolve a comma-separated mode request.
///
/// An empty request means every mode (canonical order) when `allow_all` is
/// set, otherwise just the default mode. Named modes keep request order
/// with repeats dropped.
pub fn select_modes(requested: &str, allow_all: bool) -> Result<Vec<AnalysisMode>> {
    let requested = requested.trim();
    if requested.is_empty() {
        return Ok(if allow_all { AnalysisMode::ALL.to_vec() } else { vec![AnalysisMode::DEFAULT] });
    }
    let mut modes = Vec::new();
    for name in requested.split(',') {
        let mode: AnalysisMode = name.parse()?;
        if !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    Ok(modes)
}

/// Expand a population into scan tasks, one batch per mode in `modes` order.
///
/// Binary mode draws from `binaries` and contributes nothing when no store
/// is configured. The `std` pseudo-module is never scanned. Repeated
/// identities keep their first occurrence.
pub fn build_tasks(
    population: &[ModuleSpec],
    modes: &[AnalysisMode],
    binaries: Option<&dyn BinaryStore>,
) -> Result<Vec<ScanTask>> {
    let mut tasks: IndexMap<String, ScanTask> = IndexMap::new();
    let mut add = |task: ScanTask| {
        if task.module != STD_MODULE {
            tasks.entry(task.key()).or_insert(task);
        }
    };

    for &mode in modes {
        match mode {
            AnalysisMode::Binary => match binaries {
                Some(store) => store.list()?.iter().map(ScanTask::binary).for_each(&mut add),
                None => tracing::debug!("no binary store configured, skipping binary mode"),
            },
            AnalysisMode::Source => population.iter().map(ScanTask::source).for_each(&mut add),
        }
    }
    Ok(tasks.into_values().collect())
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
