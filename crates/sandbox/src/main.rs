// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! modscan-runner: execute one sandboxed command.
//!
//! Reads a JSON `SandboxCommand` from stdin, runs it, and writes the child's
//! stdout to stdout. Logs go to stderr, prefixed with `runner:`. Exits
//! non-zero on any failure.

use std::process::ExitCode;

use modscan_sandbox::runner;
use tracing::{error, info, info_span};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("MODSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let span = info_span!("runner");
    let _enter = span.enter();

    info!("starting");
    match runner::run(std::io::stdin().lock(), std::io::stdout().lock()) {
        Ok(()) => {
            info!("succeeded");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
