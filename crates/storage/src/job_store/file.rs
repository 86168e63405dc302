// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One pretty-printed JSON document per job.

use std::ffi::OsStr;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use modscan_core::{Error, Job, Result};

use super::JobBackend;

#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

/// Ids become file names, so only a conservative character set is accepted.
fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::storage(format!("{action} {}: {e}", path.display()))
}

impl FileBackend {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| io_error("creating", &dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read(&self, path: &Path) -> Result<Option<Job>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| Error::storage(format!("parsing {}: {e}", path.display()))),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("reading", path, e)),
        }
    }
}

#[async_trait]
impl JobBackend for FileBackend {
    async fn load(&self, id: &str) -> Result<Option<Job>> {
        if !valid_id(id) {
            return Ok(None);
        }
        self.read(&self.path_for(id)).await
    }

    async fn save(&self, job: &Job) -> Result<()> {
        let id = job.id.as_str();
        if !valid_id(id) {
            return Err(Error::invalid_argument(format!("job id {id:?} is not storable")));
        }
        let mut bytes = serde_json::to_vec_pretty(job)?;
        bytes.push(b'\n');

        // Write beside the target then rename so readers never see a torn file.
        let tmp = self.dir.join(format!(".{id}.tmp"));
        let path = self.path_for(id);
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| io_error("writing", &tmp, e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| io_error("renaming", &tmp, e))?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        if !valid_id(id) {
            return Ok(false);
        }
        let path = self.path_for(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("removing", &path, e)),
        }
    }

    async fn load_all(&self) -> Result<Vec<Job>> {
        let mut entries =
            tokio::fs::read_dir(&self.dir).await.map_err(|e| io_error("listing", &self.dir, e))?;
        let mut jobs = Vec::new();
        while let Some(entry) =
            entries.next_entry().await.map_err(|e| io_error("listing", &self.dir, e))?
        {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            if let Some(job) = self.read(&path).await? {
                jobs.push(job);
            }
        }
        Ok(jobs)
    }
}
