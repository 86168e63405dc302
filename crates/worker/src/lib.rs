// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Orchestration for module scans.
//!
//! Turns a population of modules into queued [`ScanTask`]s, answers job
//! queries, and runs individual scans through the sandbox while folding
//! their outcomes into the owning job.
//!
//! [`ScanTask`]: modscan_core::ScanTask

pub mod env;

mod binaries;
mod config;
mod enqueue;
mod jobs;
mod population;
mod queue;
mod scan;
mod tasks;

pub use binaries::{BinaryStore, DirBinaryStore};
pub use config::{Config, DEFAULT_RUNNER, DEFAULT_SCAN_TOOL};
pub use enqueue::{enqueue, EnqueueParams};
pub use jobs::handle_jobs;
pub use population::{parse_population, read_population};
pub use queue::{MemoryQueue, TaskQueue};
pub use scan::{ScanOutput, ScanSettings, ScanWorker};
pub use tasks::{build_tasks, select_modes};
