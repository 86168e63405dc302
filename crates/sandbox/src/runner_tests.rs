// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use modscan_core::ErrorKind;

fn sh(script: &str) -> SandboxCommand {
    SandboxCommand::new("/bin/sh").args(["-c", script]).append_to_env(true)
}

fn run_doc(cmd: &SandboxCommand) -> (Result<()>, Vec<u8>) {
    let doc = serde_json::to_vec(cmd).unwrap();
    let mut out = Vec::new();
    let result = run(doc.as_slice(), &mut out);
    (result, out)
}

#[test]
fn success_copies_stdout_verbatim() {
    let (result, out) = run_doc(&sh("printf 'a\\nb\\n'; echo noise >&2"));
    result.unwrap();
    assert_eq!(out, b"a\nb\n");
}

#[test]
fn nonzero_exit_reports_argv_and_trimmed_stderr() {
    let (result, out) = run_doc(&sh("echo partial; echo '  bad module  ' >&2; exit 3"));
    assert!(out.is_empty());
    match result.unwrap_err() {
        Error::ExecutionFailure { args, message, stderr } => {
            assert_eq!(args[0], "/bin/sh");
            assert!(message.contains('3'), "message = {message}");
            assert_eq!(stderr, "bad module");
        }
        other => panic!("expected ExecutionFailure, got: {other:?}"),
    }
}

#[test]
fn spawn_failure_has_no_stderr() {
    let cmd = SandboxCommand::new("/nonexistent/scanner_xyz_12345");
    match execute(&cmd).unwrap_err() {
        Error::ExecutionFailure { args, stderr, .. } => {
            assert_eq!(args, vec!["/nonexistent/scanner_xyz_12345"]);
            assert!(stderr.is_empty());
        }
        other => panic!("expected ExecutionFailure, got: {other:?}"),
    }
}

#[test]
fn malformed_document_is_invalid_argument() {
    let mut out = Vec::new();
    let err = run(&b"{not json"[..], &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(out.is_empty());
}

#[test]
fn runs_in_requested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cmd = sh("pwd").dir(dir.path());
    let stdout = execute(&cmd).unwrap();
    let printed = String::from_utf8(stdout).unwrap();
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(std::path::Path::new(printed.trim()).canonicalize().unwrap(), expected);
}

#[test]
fn verbatim_environment_hides_inherited_variables() {
    let cmd = SandboxCommand::new("/bin/sh")
        .args(["-c", "echo \"${HOME:-unset}:$ONLY\""])
        .env("ONLY", "here");
    let stdout = execute(&cmd).unwrap();
    assert_eq!(String::from_utf8(stdout).unwrap(), "unset:here\n");
}

#[test]
#[serial_test::serial]
fn appended_environment_overrides_inherited_value() {
    std::env::set_var("MODSCAN_RUNNER_TEST_VAR", "inherited");
    std::env::set_var("MODSCAN_RUNNER_TEST_KEEP", "kept");
    let cmd = sh("echo \"$MODSCAN_RUNNER_TEST_VAR $MODSCAN_RUNNER_TEST_KEEP\"")
        .env("MODSCAN_RUNNER_TEST_VAR", "supplied");
    let stdout = execute(&cmd).unwrap();
    std::env::remove_var("MODSCAN_RUNNER_TEST_VAR");
    std::env::remove_var("MODSCAN_RUNNER_TEST_KEEP");
    assert_eq!(String::from_utf8(stdout).unwrap(), "supplied kept\n");
}
