// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task delivery.

use async_trait::async_trait;
use indexmap::IndexMap;
use modscan_core::{Result, ScanTask};
use parking_lot::Mutex;

/// Destination for scan tasks.
///
/// Tasks are keyed by [`ScanTask::key`]; a queue may drop a task whose key
/// it has already accepted. Delivery order is not guaranteed.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Submit one task. Returns `false` if its key was already accepted.
    async fn enqueue(&self, task: &ScanTask) -> Result<bool>;
}

/// In-process queue that remembers every accepted key.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    tasks: Mutex<IndexMap<String, ScanTask>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted tasks in submission order.
    pub fn tasks(&self) -> Vec<ScanTask> {
        self.tasks.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

#[async_trait]
impl TaskQueue for MemoryQueue {
    async fn enqueue(&self, task: &ScanTask) -> Result<bool> {
        let key = task.key();
        let mut tasks = self.tasks.lock();
        if tasks.contains_key(&key) {
            tracing::debug!(key = %key, "task already queued");
            return Ok(false);
        }
        tasks.insert(key, task.clone());
        Ok(true)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
