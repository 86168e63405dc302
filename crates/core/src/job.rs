// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan campaign records.

use crate::mode::AnalysisMode;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a scan campaign.
    pub struct JobId("job-");
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Tasks are still outstanding
    Running,
    /// Every enqueued task reported an outcome
    Completed,
    /// The campaign itself failed (e.g. enqueueing aborted)
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

crate::simple_display! {
    JobStatus {
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// Configuration snapshot taken when the campaign starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSettings {
    /// Scan tool program run inside the sandbox
    pub tool: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tool_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_args: Vec<String>,
    pub modes: Vec<AnalysisMode>,
    pub min_imported_by: u64,
}

/// Result of one task, folded into its job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Skipped,
    /// The scan ran and reported failure
    Failed(String),
    /// The scan could not be run
    Errored(String),
    Succeeded,
}

/// A scan campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub user: String,
    pub status: JobStatus,
    pub created_at_ms: u64,
    pub modified_at_ms: u64,
    pub settings: JobSettings,
    pub num_enqueued: u64,
    pub num_started: u64,
    pub num_skipped: u64,
    pub num_failed: u64,
    pub num_errored: u64,
    pub num_succeeded: u64,
    /// Most recent task failure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn new(id: JobId, user: impl Into<String>, settings: JobSettings, now_ms: u64) -> Self {
        Self {
            id,
            user: user.into(),
            status: JobStatus::Running,
            created_at_ms: now_ms,
            modified_at_ms: now_ms,
            settings,
            num_enqueued: 0,
            num_started: 0,
            num_skipped: 0,
            num_failed: 0,
            num_errored: 0,
            num_succeeded: 0,
            error: None,
        }
    }

    /// Tasks that reported any outcome.
    pub fn num_finished(&self) -> u64 {
        self.num_skipped + self.num_failed + self.num_errored + self.num_succeeded
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Count a task outcome and complete the job once all enqueued tasks
    /// have reported.
    ///
    /// Outcomes arriving after the job is terminal are still counted so the
    /// totals stay accurate under duplicate delivery, but they never move
    /// the status.
    pub fn record_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Skipped => self.num_skipped += 1,
            TaskOutcome::Failed(err) => {
                self.num_failed += 1;
                self.error = Some(err);
            }
            TaskOutcome::Errored(err) => {
                self.num_errored += 1;
                self.error = Some(err);
            }
            TaskOutcome::Succeeded => self.num_succeeded += 1,
        }
        self.complete_if_done();
    }

    /// Count `n` more enqueued tasks.
    ///
    /// Outcomes may be recorded before the enqueue that produced their tasks
    /// is counted, so completion is checked here as well.
    pub fn add_enqueued(&mut self, n: u64) {
        self.num_enqueued += n;
        self.complete_if_done();
    }

    fn complete_if_done(&mut self) {
        if self.status == JobStatus::Running
            && self.num_enqueued > 0
            && self.num_finished() >= self.num_enqueued
        {
            self.status = JobStatus::Completed;
        }
    }

    pub fn cancel(&mut self) {
        if !self.is_terminal() {
            self.status = JobStatus::Cancelled;
        }
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        if !self.is_terminal() {
            self.status = JobStatus::Failed;
        }
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-test",
            user: String = "tester",
        }
        set {
            status: JobStatus = JobStatus::Running,
            created_at_ms: u64 = 1_000_000,
            modified_at_ms: u64 = 1_000_000,
            settings: JobSettings = JobSettings::default(),
            num_enqueued: u64 = 0,
        }
        computed {
            num_started: u64 = 0,
            num_skipped: u64 = 0,
            num_failed: u64 = 0,
            num_errored: u64 = 0,
            num_succeeded: u64 = 0,
            error: Option<String> = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
