// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Isolated command execution.
//!
//! A [`SandboxCommand`] is the only thing that crosses the trust boundary:
//! the orchestrator serializes it onto the stdin of a separate
//! `modscan-runner` process, which executes it once and reports the child's
//! stdout (or a diagnostic on stderr) before exiting.

mod client;
mod command;
pub mod runner;

pub use client::{CommandExecutor, Sandbox};
pub use command::SandboxCommand;

#[cfg(any(test, feature = "test-support"))]
pub use client::fake::{ExecutorCall, FakeExecutor};
