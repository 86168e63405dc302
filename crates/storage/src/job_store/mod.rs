// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job persistence.
//!
//! [`JobStore`] is the interface the request layer and scan workers use.
//! [`LeasedJobStore`] implements it over any [`JobBackend`], serializing
//! read-modify-write cycles per job id with a [`Leases`] map.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use async_trait::async_trait;
use modscan_core::{Clock, Error, Job, Result, SystemClock};
use tokio_util::sync::CancellationToken;

use crate::cancel::cancellable;
use crate::lease::Leases;

/// Edit applied to a job inside [`JobStore::update_job`].
///
/// Receives a private copy; returning an error discards it.
pub type JobMutator<'a> = Box<dyn FnOnce(&mut Job) -> Result<()> + Send + 'a>;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new job. Fails with `InvalidArgument` if the id is taken.
    async fn create_job(&self, job: Job, cancel: &CancellationToken) -> Result<()>;

    async fn get_job(&self, id: &str, cancel: &CancellationToken) -> Result<Job>;

    /// Atomically read, mutate and write back one job.
    ///
    /// Concurrent updates to the same id are applied one after another;
    /// updates to different ids proceed in parallel. Returns the job as
    /// persisted.
    async fn update_job(
        &self,
        id: &str,
        mutate: JobMutator<'_>,
        cancel: &CancellationToken,
    ) -> Result<Job>;

    async fn delete_job(&self, id: &str, cancel: &CancellationToken) -> Result<()>;

    /// All jobs, oldest first.
    async fn list_jobs(&self, cancel: &CancellationToken) -> Result<Vec<Job>>;
}

/// Raw record storage underneath a [`LeasedJobStore`].
///
/// Backends need no locking of their own beyond memory safety; the store
/// holds the per-id lease around every load/save pair.
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<Job>>;
    async fn save(&self, job: &Job) -> Result<()>;
    /// Returns whether a record was removed.
    async fn remove(&self, id: &str) -> Result<bool>;
    async fn load_all(&self) -> Result<Vec<Job>>;
}

pub type MemoryJobStore = LeasedJobStore<MemoryBackend>;
pub type FileJobStore = LeasedJobStore<FileBackend>;

pub struct LeasedJobStore<B> {
    backend: B,
    leases: Leases,
    clock: Arc<dyn Clock>,
}

impl<B: JobBackend> LeasedJobStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, leases: Leases::new(), clock: Arc::new(SystemClock) }
    }

    /// Use `clock` for `modified_at_ms` stamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl MemoryJobStore {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }
}

impl FileJobStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub async fn open(dir: impl Into<std::path::PathBuf>) -> Result<Self> {
        Ok(Self::new(FileBackend::open(dir).await?))
    }
}

fn missing(id: &str) -> Error {
    Error::not_found(format!("job {id}"))
}

#[async_trait]
impl<B: JobBackend> JobStore for LeasedJobStore<B> {
    async fn create_job(&self, job: Job, cancel: &CancellationToken) -> Result<()> {
        let lease = cancellable(cancel, async { Ok(self.leases.acquire(job.id.as_str()).await) })
            .await?;
        let existing = cancellable(cancel, self.backend.load(lease.key())).await?;
        if existing.is_some() {
            return Err(Error::invalid_argument(format!("job {} already exists", job.id)));
        }
        self.backend.save(&job).await?;
        tracing::debug!(job_id = %job.id, user = %job.user, "job created");
        Ok(())
    }

    async fn get_job(&self, id: &str, cancel: &CancellationToken) -> Result<Job> {
        cancellable(cancel, self.backend.load(id)).await?.ok_or_else(|| missing(id))
    }

    async fn update_job(
        &self,
        id: &str,
        mutate: JobMutator<'_>,
        cancel: &CancellationToken,
    ) -> Result<Job> {
        let _lease = cancellable(cancel, async { Ok(self.leases.acquire(id).await) }).await?;
        let current = cancellable(cancel, self.backend.load(id)).await?.ok_or_else(|| missing(id))?;

        let mut next = current.clone();
        mutate(&mut next)?;
        if next.id != current.id {
            return Err(Error::invalid_argument(format!(
                "update of job {id} changed its id to {}",
                next.id
            )));
        }
        next.modified_at_ms = self.clock.epoch_ms();

        // Past this point the write is not abandoned on cancellation.
        self.backend.save(&next).await?;
        Ok(next)
    }

    async fn delete_job(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _lease = cancellable(cancel, async { Ok(self.leases.acquire(id).await) }).await?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.backend.remove(id).await? {
            tracing::debug!(job_id = id, "job deleted");
            Ok(())
        } else {
            Err(missing(id))
        }
    }

    async fn list_jobs(&self, cancel: &CancellationToken) -> Result<Vec<Job>> {
        let mut jobs = cancellable(cancel, self.backend.load_all()).await?;
        jobs.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "../job_store_tests.rs"]
mod tests;
