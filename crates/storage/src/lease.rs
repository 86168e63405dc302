// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-key exclusive leases.
//!
//! Holders of the same key are serialized; different keys never contend
//! beyond the short map lock. Entries are dropped once nobody holds or waits
//! for them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct Leases {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl Leases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lease on `key`.
    pub async fn acquire(&self, key: &str) -> Lease<'_> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key.to_string()).or_default())
        };
        let guard = slot.lock_owned().await;
        Lease { leases: self, key: key.to_string(), guard: Some(guard) }
    }

    /// Number of keys currently held or awaited.
    pub fn active(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Exclusive hold on one key; released on drop.
#[derive(Debug)]
pub struct Lease<'a> {
    leases: &'a Leases,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Lease<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let Some(guard) = self.guard.take() else { return };
        let slot = Arc::clone(OwnedMutexGuard::mutex(&guard));
        drop(guard);

        // Slot clones are only taken under this lock, so a count of two
        // (map + `slot`) means no one is waiting.
        let mut slots = self.leases.slots.lock();
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&self.key);
        }
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
