// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enqueueing a scan campaign.

use std::path::PathBuf;

use modscan_core::{AnalysisMode, Error, Job, JobId, Result, ScanTask};
use modscan_storage::JobStore;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::binaries::BinaryStore;
use crate::config::Config;
use crate::population::read_population;
use crate::queue::TaskQueue;
use crate::tasks::{build_tasks, select_modes};

/// Parameters of an enqueue request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnqueueParams {
    /// Skip modules with fewer importers
    pub min_imported_by: u64,
    /// Population file
    pub file: PathBuf,
    /// Comma-separated analysis modes; empty selects the defaults
    pub mode: String,
    /// With an empty `mode`, run every mode instead of only the default
    pub all: bool,
    /// Job whose `num_enqueued` counts the submitted tasks
    pub job_id: Option<JobId>,
}

/// Build the tasks for `params` and submit them to `queue`.
///
/// Returns the tasks the queue accepted. Tasks it already held are not
/// returned and not counted against the job.
pub async fn enqueue(
    params: &EnqueueParams,
    config: &Config,
    queue: &dyn TaskQueue,
    store: Option<&dyn JobStore>,
    cancel: &CancellationToken,
) -> Result<Vec<ScanTask>> {
    let modes = select_modes(&params.mode, params.all)?;

    // Resolve the job before submitting anything so a bad id enqueues nothing.
    let job = match &params.job_id {
        Some(id) => {
            let store = store.ok_or_else(|| {
                Error::NotImplemented("jobs store not configured".to_string())
            })?;
            store.get_job(id.as_str(), cancel).await?;
            Some((store, id))
        }
        None => None,
    };

    let population = read_population(&params.file, params.min_imported_by).await?;
    let binaries = match config.binary_store() {
        Some(store) if modes.contains(&AnalysisMode::Binary) => Some(store.snapshot().await?),
        _ => None,
    };
    let tasks = build_tasks(
        &population,
        &modes,
        binaries.as_ref().map(|b| b as &dyn BinaryStore),
    )?;

    let mut submitted = Vec::with_capacity(tasks.len());
    for task in tasks {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if queue.enqueue(&task).await? {
            submitted.push(task);
        }
    }
    tracing::info!(
        modes = ?modes,
        population = population.len(),
        submitted = submitted.len(),
        job_id = params.job_id.as_ref().map(JobId::as_str),
        "enqueued scan tasks"
    );

    if let Some((store, id)) = job {
        let count = submitted.len() as u64;
        store
            .update_job(
                id.as_str(),
                Box::new(move |j: &mut Job| {
                    j.add_enqueued(count);
                    Ok(())
                }),
                cancel,
            )
            .await?;
    }
    Ok(submitted)
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
