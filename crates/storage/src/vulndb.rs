// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability table access.
//!
//! The table is append-only: every ingest of an advisory adds a row, so the
//! same id may appear many times with different modification times.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use modscan_core::{Error, Result, VulnEntry};
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::cancel::cancellable;

/// Read side of a vulnerability table.
#[async_trait]
pub trait VulnTable: Send + Sync {
    /// Every row, in table order.
    async fn read_rows(&self) -> Result<Vec<VulnEntry>>;
}

#[derive(Debug, Default)]
pub struct MemoryVulnTable {
    rows: Mutex<Vec<VulnEntry>>,
}

impl MemoryVulnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, rows: impl IntoIterator<Item = VulnEntry>) {
        self.rows.lock().extend(rows);
    }
}

#[async_trait]
impl VulnTable for MemoryVulnTable {
    async fn read_rows(&self) -> Result<Vec<VulnEntry>> {
        Ok(self.rows.lock().clone())
    }
}

/// Table stored as one JSON row per line.
#[derive(Debug, Clone)]
pub struct JsonlVulnTable {
    path: PathBuf,
}

impl JsonlVulnTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, rows: &[VulnEntry]) -> Result<()> {
        let mut buf = Vec::new();
        for row in rows {
            serde_json::to_writer(&mut buf, row)?;
            buf.push(b'\n');
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::storage(format!("opening {}: {e}", self.path.display())))?;
        file.write_all(&buf)
            .await
            .map_err(|e| Error::storage(format!("appending to {}: {e}", self.path.display())))?;
        file.flush()
            .await
            .map_err(|e| Error::storage(format!("appending to {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl VulnTable for JsonlVulnTable {
    async fn read_rows(&self) -> Result<Vec<VulnEntry>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::storage(format!("reading {}: {e}", self.path.display())))?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    Error::storage(format!("{}:{}: {e}", self.path.display(), i + 1))
                })
            })
            .collect()
    }
}

/// Keep the newest row per id, ordered by id.
///
/// A row without a modification time is older than any row with one. When
/// two rows share the newest time the one seen first wins.
pub fn most_recent(rows: impl IntoIterator<Item = VulnEntry>) -> Vec<VulnEntry> {
    let mut newest: BTreeMap<String, VulnEntry> = BTreeMap::new();
    for row in rows {
        match newest.get(&row.id) {
            Some(kept) if kept.modified_time >= row.modified_time => {}
            _ => {
                newest.insert(row.id.clone(), row);
            }
        }
    }
    newest.into_values().collect()
}

/// Current view of the table: one row per id, the most recently modified.
///
/// Read failures surface as `StorageAccess` without retrying.
pub async fn read_most_recent(
    table: &dyn VulnTable,
    cancel: &CancellationToken,
) -> Result<Vec<VulnEntry>> {
    let rows = cancellable(cancel, async {
        table.read_rows().await.map_err(|e| match e {
            e @ (Error::StorageAccess(_) | Error::Cancelled) => e,
            other => Error::storage(other),
        })
    })
    .await?;
    let total = rows.len();
    let entries = most_recent(rows);
    tracing::debug!(rows = total, entries = entries.len(), "read vulnerability table");
    Ok(entries)
}

/// Write `entries` as a pretty JSON array for a scan to consume.
pub async fn write_snapshot(entries: &[VulnEntry], path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(entries)?;
    let name = path
        .file_name()
        .ok_or_else(|| Error::InvalidArgument(format!("snapshot path {}", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    // Same directory as the target so the rename cannot cross filesystems.
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| Error::storage(format!("writing snapshot {}: {e}", tmp.display())))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(Error::storage(format!("renaming snapshot {}: {e}", path.display())));
    }
    Ok(())
}

#[cfg(test)]
#[path = "vulndb_tests.rs"]
mod tests;
