// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! modscan-core: shared domain types for the module scanning pipeline

pub mod macros;

pub mod clock;
pub mod error;
pub mod id;
pub mod job;
pub mod mode;
pub mod task;
pub mod vuln;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{Error, ErrorKind, Result};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobId, JobSettings, JobStatus, TaskOutcome};
pub use mode::AnalysisMode;
pub use task::{BinarySpec, ModuleSpec, ScanTask, STD_MODULE};
pub use vuln::{
    convert, Advisory, Affected, AffectedModule, Range, RangeEvent, VulnEntry, VulnModule,
    VulnRange,
};
