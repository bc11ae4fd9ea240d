// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::builder::ProcessBuilder;
use super::io::{STDERR_LINE_BYTES, STDERR_TAIL_LINES, read_stderr};
use crate::error::ProcessError;

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("sh").arg("-c").arg(script)
}

#[cfg(unix)]
#[test]
fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .run()
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(String::from_utf8_lossy(output.stdout()).trim(), @"hello");
}

#[cfg(unix)]
#[test]
fn test_non_zero_exit_is_not_an_error() {
    let output = sh("echo partial; echo oops >&2; exit 42")
        .run()
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
    assert_eq!(output.stdout(), b"partial\n");
    assert_eq!(output.stderr(), "oops");
}

#[test]
fn test_stderr_keeps_only_the_tail() {
    let input: String = (0..1000).map(|i| format!("line {i}\r\n")).collect();
    let kept = read_stderr(input.as_bytes(), "svn");
    let lines: Vec<&str> = kept.lines().collect();
    assert_eq!(lines.len(), STDERR_TAIL_LINES);
    assert_eq!(lines.first(), Some(&"line 936"));
    assert_eq!(lines.last(), Some(&"line 999"));
}

#[test]
fn test_stderr_splits_overlong_lines() {
    let input = "x".repeat(STDERR_LINE_BYTES * 2 + 10);
    let kept = read_stderr(input.as_bytes(), "svn");
    let lengths: Vec<usize> = kept.lines().map(str::len).collect();
    assert_eq!(lengths, vec![STDERR_LINE_BYTES, STDERR_LINE_BYTES, 10]);
}

#[cfg(unix)]
#[test]
fn test_stderr_flood_is_bounded() {
    let output = sh("i=0; while [ $i -lt 5000 ]; do echo \"svn: warning $i\" >&2; i=$((i+1)); done")
        .run()
        .expect("process should complete");
    assert!(output.success());
    assert_eq!(output.stderr().lines().count(), STDERR_TAIL_LINES);
    assert!(output.stderr().ends_with("svn: warning 4999"));
}

#[cfg(unix)]
#[test]
fn test_process_env() {
    let output = sh("printf %s \"$SCM_TEST_VAR\"")
        .env("SCM_TEST_VAR", "test_value")
        .run()
        .expect("process should succeed");

    assert_eq!(output.stdout(), b"test_value");
}

#[cfg(unix)]
#[test]
fn test_arguments_are_not_shell_interpreted() {
    let output = ProcessBuilder::new("printf")
        .arg("%s")
        .arg("a b; $(rm -rf /) 'c'")
        .run()
        .expect("printf should succeed");

    assert_eq!(output.stdout(), b"a b; $(rm -rf /) 'c'");
}

#[test]
fn test_missing_executable_is_not_found() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .arg("--version")
        .run()
        .unwrap_err();

    assert!(
        matches!(err, ProcessError::ExecutableNotFound { ref name } if name == "nonexistent_program_12345"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_missing_executable_path_is_not_found() {
    let err = ProcessBuilder::new("/nonexistent/dir/svn").run().unwrap_err();
    assert!(matches!(err, ProcessError::ExecutableNotFound { .. }));
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";
    assert!(ProcessBuilder::find(program).is_none());
}

#[cfg(unix)]
#[test]
fn test_executable_lookup_found_is_cached() {
    let first = ProcessBuilder::find("sh").expect("sh should be in PATH");
    let second = ProcessBuilder::find("sh").expect("sh should still be in PATH");
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_timeout_kills_process() {
    let started = Instant::now();
    let err = sh("exec sleep 10")
        .timeout(Duration::from_millis(200))
        .run()
        .unwrap_err();

    assert!(matches!(err, ProcessError::Timeout { .. }), "unexpected error: {err}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[cfg(unix)]
#[test]
fn test_output_limit_kills_process() {
    let err = sh("exec yes")
        .output_limit(4096)
        .timeout(Duration::from_secs(10))
        .run()
        .unwrap_err();

    assert!(
        matches!(err, ProcessError::OutputLimitExceeded { limit: 4096, .. }),
        "unexpected error: {err}"
    );
}

#[cfg(unix)]
#[test]
fn test_output_under_limit_is_kept() {
    let output = sh("printf 0123456789")
        .output_limit(10)
        .run()
        .expect("output fits the limit");
    assert_eq!(output.stdout(), b"0123456789");
}

#[cfg(unix)]
#[test]
fn test_cancelled_token_kills_process() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(100));
        canceller.cancel();
    });

    let err = sh("exec sleep 10")
        .cancel_token(token)
        .run()
        .unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, ProcessError::Cancelled { .. }), "unexpected error: {err}");
}

#[test]
fn test_command_line_masks_secret_arguments() {
    let builder = ProcessBuilder::new("svn")
        .args(["log", "--username", "jdoe", "--password"])
        .secret_arg("hunter2")
        .arg("http://host/repo with space");

    insta::assert_snapshot!(
        builder.command_line(),
        @r#"svn log --username jdoe --password *** "http://host/repo with space""#
    );
}
