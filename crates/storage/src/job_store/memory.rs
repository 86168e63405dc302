// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use async_trait::async_trait;
use modscan_core::{Job, Result};
use parking_lot::Mutex;

use super::JobBackend;

/// Jobs held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    jobs: Mutex<HashMap<String, Job>>,
}

impl MemoryBackend {
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }
}

#[async_trait]
impl JobBackend for MemoryBackend {
    async fn load(&self, id: &str) -> Result<Option<Job>> {
        Ok(self.jobs.lock().get(id).cloned())
    }

    async fn save(&self, job: &Job) -> Result<()> {
        self.jobs.lock().insert(job.id.to_string(), job.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.jobs.lock().remove(id).is_some())
    }

    async fn load_all(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.lock().values().cloned().collect())
    }
}
