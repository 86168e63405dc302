// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner side of the sandbox protocol.
//!
//! One invocation: read a [`SandboxCommand`] document, run it once, copy the
//! child's stdout through. Every failure is terminal for the runner process.

use std::io::{Read, Write};
use std::process::{Command, Stdio};

use modscan_core::{Error, Result};
use tracing::{debug, info};

use crate::SandboxCommand;

/// Parse a command document.
pub fn parse_command(input: &[u8]) -> Result<SandboxCommand> {
    serde_json::from_slice(input)
        .map_err(|e| Error::invalid_argument(format!("malformed sandbox command: {e}")))
}

/// Run `cmd` to completion and return its captured stdout.
///
/// A non-zero exit carries the child's stderr, trimmed, in the error; a
/// spawn failure carries only the OS error.
pub fn execute(cmd: &SandboxCommand) -> Result<Vec<u8>> {
    let mut child = Command::new(&cmd.path);
    child
        .args(&cmd.args)
        .env_clear()
        .envs(cmd.effective_env(std::env::vars_os()))
        .stdin(Stdio::null());
    if !cmd.dir.as_os_str().is_empty() {
        child.current_dir(&cmd.dir);
    }

    let output = child.output().map_err(|e| Error::ExecutionFailure {
        args: cmd.argv(),
        message: e.to_string(),
        stderr: String::new(),
    })?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(Error::ExecutionFailure {
            args: cmd.argv(),
            message: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// The whole runner protocol over arbitrary streams.
///
/// Nothing is written to `output` unless the child succeeded.
pub fn run(mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .map_err(|e| Error::invalid_argument(format!("reading command: {e}")))?;
    debug!(bytes = buf.len(), "read command");

    let cmd = parse_command(&buf)?;
    info!(argv = ?cmd.argv(), dir = %cmd.dir.display(), append_to_env = cmd.append_to_env, "cmd");

    let stdout = execute(&cmd)?;
    output
        .write_all(&stdout)
        .and_then(|()| output.flush())
        .map_err(|e| Error::storage(format!("writing output: {e}")))?;
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
