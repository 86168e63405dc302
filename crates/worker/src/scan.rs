// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running one scan task.

use std::path::PathBuf;
use std::sync::Arc;

use modscan_core::{Error, Job, JobStatus, Result, ScanTask, TaskOutcome};
use modscan_sandbox::{CommandExecutor, Sandbox, SandboxCommand};
use modscan_storage::{read_most_recent, write_snapshot, JobStore, VulnTable};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// How scans are invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Scan tool run inside the sandbox
    pub tool: PathBuf,
    /// Extra arguments placed before the per-task ones
    pub tool_args: Vec<String>,
    /// Vulnerability snapshot handed to the tool with `-db`
    pub snapshot: PathBuf,
    /// Working directory for the tool; empty uses the runner's
    pub work_dir: PathBuf,
}

impl ScanSettings {
    pub fn new(tool: impl Into<PathBuf>, snapshot: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            tool_args: Vec::new(),
            snapshot: snapshot.into(),
            work_dir: PathBuf::new(),
        }
    }

    modscan_core::setters! {
        into {
            work_dir: PathBuf,
        }
        set {
            tool_args: Vec<String>,
        }
    }

    /// The sandboxed command that scans `task`.
    pub fn command_for(&self, task: &ScanTask) -> SandboxCommand {
        Sandbox::command(&self.tool)
            .args(self.tool_args.iter().cloned())
            .args(["-mode", task.mode.as_str(), "-db"])
            .arg(self.snapshot.to_string_lossy())
            .arg(task.target())
            .dir(&self.work_dir)
            .append_to_env(true)
            .env("MODSCAN_MODULE", &task.module)
            .env("MODSCAN_VERSION", &task.version)
            .env("MODSCAN_MODE", task.mode.as_str())
    }
}

/// Stdout of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    pub task: ScanTask,
    pub stdout: Vec<u8>,
}

/// Executes scan tasks and folds their outcomes into jobs.
pub struct ScanWorker {
    executor: Arc<dyn CommandExecutor>,
    store: Arc<dyn JobStore>,
    settings: ScanSettings,
}

impl ScanWorker {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        store: Arc<dyn JobStore>,
        settings: ScanSettings,
    ) -> Self {
        Self { executor, store, settings }
    }

    /// Worker using the configured sandbox and scan tool.
    pub fn from_config(config: &Config, store: Arc<dyn JobStore>, snapshot: PathBuf) -> Self {
        Self::new(
            Arc::new(config.sandbox()),
            store,
            ScanSettings::new(&config.scan_tool, snapshot),
        )
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Export the current vulnerability view to the snapshot path.
    ///
    /// Returns the number of entries written.
    pub async fn refresh_snapshot(
        &self,
        table: &dyn VulnTable,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let entries = read_most_recent(table, cancel).await?;
        write_snapshot(&entries, &self.settings.snapshot).await?;
        tracing::info!(
            entries = entries.len(),
            path = %self.settings.snapshot.display(),
            "vulnerability snapshot written"
        );
        Ok(entries.len())
    }

    /// Run `task`, recording its outcome against `job_id` if given.
    ///
    /// Returns `None` without running anything when the job was cancelled.
    /// A scan that runs and fails returns its `ExecutionFailure` after the
    /// job has been updated.
    pub async fn process(
        &self,
        task: &ScanTask,
        job_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<ScanOutput>> {
        if let Some(id) = job_id {
            let mut skipped = false;
            let flag = &mut skipped;
            self.store
                .update_job(
                    id,
                    Box::new(move |job: &mut Job| {
                        if job.status == JobStatus::Cancelled {
                            job.record_outcome(TaskOutcome::Skipped);
                            *flag = true;
                        } else {
                            job.num_started += 1;
                        }
                        Ok(())
                    }),
                    cancel,
                )
                .await?;
            if skipped {
                tracing::info!(job_id = id, task = %task, "job cancelled, skipping scan");
                return Ok(None);
            }
        }

        let command = self.settings.command_for(task);
        tracing::info!(job_id, task = %task, "scan starting");
        let result = self.executor.output(&command).await;

        let outcome = match &result {
            Ok(_) => TaskOutcome::Succeeded,
            Err(e @ Error::ExecutionFailure { .. }) => TaskOutcome::Failed(e.to_string()),
            Err(e) => TaskOutcome::Errored(e.to_string()),
        };
        match &outcome {
            TaskOutcome::Succeeded => tracing::info!(job_id, task = %task, "scan succeeded"),
            TaskOutcome::Failed(e) | TaskOutcome::Errored(e) => {
                tracing::warn!(job_id, task = %task, error = %e, "scan failed")
            }
            TaskOutcome::Skipped => {}
        }

        if let Some(id) = job_id {
            self.store
                .update_job(
                    id,
                    Box::new(move |job: &mut Job| {
                        job.record_outcome(outcome);
                        Ok(())
                    }),
                    cancel,
                )
                .await?;
        }

        result.map(|stdout| Some(ScanOutput { task: task.clone(), stdout }))
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
