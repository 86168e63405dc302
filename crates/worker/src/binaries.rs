// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prebuilt binaries available for binary-mode scans.

use std::path::{Path, PathBuf};

use modscan_core::{BinarySpec, Error, Result};

/// Lists the binaries a binary-mode scan can target.
pub trait BinaryStore: Send + Sync {
    fn list(&self) -> Result<Vec<BinarySpec>>;
}

/// Binaries laid out on disk as `<module>@<version>/<suffix>`.
///
/// The module path may itself contain slashes; everything before the first
/// `@` is the module, the next path component is the version, and the rest
/// is the suffix naming the binary within that module.
#[derive(Debug, Clone)]
pub struct DirBinaryStore {
    root: PathBuf,
}

impl DirBinaryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory on the blocking pool and return what it holds.
    pub async fn snapshot(&self) -> Result<Vec<BinarySpec>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.list())
            .await
            .map_err(|e| Error::storage(format!("listing {}: {e}", self.root.display())))?
    }
}

fn parse_relative(rel: &str) -> Option<BinarySpec> {
    let (module, rest) = rel.split_once('@')?;
    let (version, suffix) = rest.split_once('/').unwrap_or((rest, ""));
    if module.is_empty() || version.is_empty() {
        return None;
    }
    Some(BinarySpec {
        module: module.to_string(),
        version: version.to_string(),
        suffix: suffix.to_string(),
    })
}

impl BinaryStore for DirBinaryStore {
    fn list(&self) -> Result<Vec<BinarySpec>> {
        let pattern = glob::Pattern::escape(&self.root.to_string_lossy()) + "/**/*";
        let paths = glob::glob(&pattern)
            .map_err(|e| Error::storage(format!("listing {}: {e}", self.root.display())))?;

        let mut binaries = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| Error::storage(format!("listing binaries: {e}")))?;
            if !path.is_file() {
                continue;
            }
            let Ok(rel) = path.strip_prefix(&self.root) else { continue };
            let rel = rel.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
            match parse_relative(&rel) {
                Some(spec) => binaries.push(spec),
                None => tracing::warn!(path = %rel, "ignoring binary outside module@version layout"),
            }
        }
        binaries.sort();
        Ok(binaries)
    }
}

/// A listing already taken, for handing to [`crate::tasks::build_tasks`].
impl BinaryStore for Vec<BinarySpec> {
    fn list(&self) -> Result<Vec<BinarySpec>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
#[path = "binaries_tests.rs"]
mod tests;
