// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module population files.
//!
//! One `module version imported_by` triple per line. Blank lines and lines
//! starting with `#` are ignored.

use std::path::Path;

use modscan_core::{Error, ModuleSpec, Result};

/// Parse a population, keeping modules with at least `min_imported_by`
/// importers.
pub fn parse_population(text: &str, min_imported_by: u64) -> Result<Vec<ModuleSpec>> {
    let mut modules = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [path, version, imported_by] = fields[..] else {
            return Err(Error::invalid_argument(format!(
                "line {}: expected `module version imported_by`, got {line:?}",
                i + 1
            )));
        };
        let imported_by: u64 = imported_by.parse().map_err(|_| {
            Error::invalid_argument(format!("line {}: bad importer count {imported_by:?}", i + 1))
        })?;
        if imported_by >= min_imported_by {
            modules.push(ModuleSpec::new(path, version, imported_by));
        }
    }
    Ok(modules)
}

pub async fn read_population(path: &Path, min_imported_by: u64) -> Result<Vec<ModuleSpec>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::invalid_argument(format!("reading population {}: {e}", path.display()))
    })?;
    let modules = parse_population(&text, min_imported_by)?;
    tracing::debug!(path = %path.display(), modules = modules.len(), min_imported_by, "read population");
    Ok(modules)
}

#[cfg(test)]
#[path = "population_tests.rs"]
mod tests;
