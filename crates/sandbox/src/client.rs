// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator side of the sandbox protocol.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use modscan_core::{Error, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::SandboxCommand;

/// Runs a [`SandboxCommand`] and returns its stdout.
///
/// Blocks (asynchronously) until the command has fully completed or failed.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn output(&self, cmd: &SandboxCommand) -> Result<Vec<u8>>;
}

/// Launches `modscan-runner` as a separate OS process per command.
///
/// An optional launcher (e.g. a container runtime invocation) wraps the
/// runner so it executes inside a stronger isolation boundary; the command
/// document still travels only over the runner's stdin.
#[derive(Debug, Clone)]
pub struct Sandbox {
    runner: PathBuf,
    launcher: Option<(PathBuf, Vec<String>)>,
    timeout: Option<Duration>,
}

impl Sandbox {
    pub fn new(runner: impl Into<PathBuf>) -> Self {
        Self { runner: runner.into(), launcher: None, timeout: None }
    }

    /// Run the runner as the last argument of `program args...`.
    pub fn with_launcher(mut self, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.launcher = Some((program.into(), args));
        self
    }

    /// Start building a command for `program`.
    pub fn command(program: impl Into<PathBuf>) -> SandboxCommand {
        SandboxCommand::new(program)
    }

    /// Kill the runner if it has not finished after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn runner_command(&self) -> Command {
        let mut command = match &self.launcher {
            Some((program, args)) => {
                let mut c = Command::new(program);
                c.args(args).arg(&self.runner);
                c
            }
            None => Command::new(&self.runner),
        };
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout can take down the scan tool too.
        #[cfg(unix)]
        command.process_group(0);
        command
    }

    async fn run(&self, cmd: &SandboxCommand) -> Result<Vec<u8>> {
        let doc = serde_json::to_vec(cmd)
            .map_err(|e| Error::invalid_argument(format!("encoding sandbox command: {e}")))?;
        let failure = |message: String, stderr: String| Error::ExecutionFailure {
            args: cmd.argv(),
            message,
            stderr,
        };

        let mut child = self
            .runner_command()
            .spawn()
            .map_err(|e| failure(format!("starting {}: {e}", self.runner.display()), String::new()))?;
        let pid = child.id();

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&doc)
                .await
                .map_err(|e| failure(format!("writing command: {e}"), String::new()))?;
            // Dropping stdin closes the pipe so the runner sees EOF
        }

        let wait = child.wait_with_output();
        let waited = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, wait).await {
                Ok(waited) => waited,
                Err(_) => {
                    if let Some(pid) = pid {
                        kill_group(pid);
                    }
                    return Err(failure(format!("timed out after {timeout:?}"), String::new()));
                }
            },
            None => wait.await,
        };
        let output =
            waited.map_err(|e| failure(format!("waiting for runner: {e}"), String::new()))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(failure(
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// SIGKILL the runner's process group, reaching the scan tool it started.
#[cfg(unix)]
fn kill_group(pgid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pgid) else { return };
    if let Err(e) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        // ESRCH: every member already exited
        if e != nix::errno::Errno::ESRCH {
            tracing::warn!(pgid, error = %e, "failed to kill runner process group");
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_pgid: u32) {}

#[async_trait]
impl CommandExecutor for Sandbox {
    async fn output(&self, cmd: &SandboxCommand) -> Result<Vec<u8>> {
        tracing::debug!(argv = ?cmd.argv(), runner = %self.runner.display(), "sandbox exec");
        self.run(cmd).await
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod fake {
    use super::{CommandExecutor, SandboxCommand};
    use async_trait::async_trait;
    use modscan_core::{Error, Result};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded executor call
    #[derive(Debug, Clone)]
    pub struct ExecutorCall {
        pub command: SandboxCommand,
    }

    type Responder = dyn Fn(&SandboxCommand) -> Result<Vec<u8>> + Send + Sync;

    /// Fake executor that records commands and answers from a closure.
    #[derive(Clone)]
    pub struct FakeExecutor {
        calls: Arc<Mutex<Vec<ExecutorCall>>>,
        respond: Arc<Responder>,
    }

    impl FakeExecutor {
        pub fn new(
            respond: impl Fn(&SandboxCommand) -> Result<Vec<u8>> + Send + Sync + 'static,
        ) -> Self {
            Self { calls: Arc::new(Mutex::new(Vec::new())), respond: Arc::new(respond) }
        }

        /// Every command succeeds with the given stdout.
        pub fn succeeding(stdout: &str) -> Self {
            let stdout = stdout.as_bytes().to_vec();
            Self::new(move |_| Ok(stdout.clone()))
        }

        /// Every command exits non-zero with the given stderr.
        pub fn failing(stderr: &str) -> Self {
            let stderr = stderr.to_string();
            Self::new(move |cmd| {
                Err(Error::ExecutionFailure {
                    args: cmd.argv(),
                    message: "exit status: 1".to_string(),
                    stderr: stderr.clone(),
                })
            })
        }

        pub fn calls(&self) -> Vec<ExecutorCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl CommandExecutor for FakeExecutor {
        async fn output(&self, cmd: &SandboxCommand) -> Result<Vec<u8>> {
            self.calls.lock().push(ExecutorCall { command: cmd.clone() });
            (self.respond)(cmd)
        }
    }
}
