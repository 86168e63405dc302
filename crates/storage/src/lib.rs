// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer: the job store and the vulnerability table reader.

mod cancel;
mod job_store;
mod lease;
mod vulndb;

pub use cancel::cancellable;
pub use job_store::{
    FileBackend, FileJobStore, JobBackend, JobMutator, JobStore, LeasedJobStore, MemoryBackend,
    MemoryJobStore,
};
pub use lease::{Lease, Leases};
pub use vulndb::{
    most_recent, read_most_recent, write_snapshot, JsonlVulnTable, MemoryVulnTable, VulnTable,
};
