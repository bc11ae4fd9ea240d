// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture and waiting for processes.
//!
//! ```text
//! collect()
//!   thread::scope
//!     stdout reader  bytes, stops at output_limit (sets overflow)
//!     stderr reader  lines, traced, last STDERR_TAIL_LINES kept
//!     waiter         poll try_wait every 10ms
//!                      overflow  --> kill --> OutputLimitExceeded
//!                      cancelled --> kill --> Cancelled
//!                      deadline  --> kill --> Timeout
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const READ_CHUNK: usize = 8192;
/// Stderr lines kept for diagnostics; older lines are only traced.
pub(super) const STDERR_TAIL_LINES: usize = 64;
/// Longer stderr lines are split at this length.
pub(super) const STDERR_LINE_BYTES: usize = 4096;

/// Why a running process had to be killed.
enum Stop {
    Timeout(Duration),
    Cancelled,
    OutputLimit(usize),
}

impl ProcessBuilder {
    /// Drains the child's pipes and waits for it to finish.
    pub(super) fn collect(
        &self,
        name: &str,
        cmd_line: &str,
        mut child: Child,
    ) -> Result<ProcessOutput, ProcessError> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let overflow = AtomicBool::new(false);
        let limit = self.output_limit_bytes();

        let (waited, stdout, stderr) = thread::scope(|s| {
            let stdout_handle = stdout.map(|out| s.spawn(|| read_stdout(out, limit, &overflow)));
            let stderr_handle = stderr.map(|err| s.spawn(|| read_stderr(err, name)));

            let waited = self.wait(name, &mut child, &overflow);

            let stdout = stdout_handle
                .and_then(|h| h.join().ok())
                .unwrap_or_default();
            let stderr = stderr_handle
                .and_then(|h| h.join().ok())
                .unwrap_or_default();
            (waited, stdout, stderr)
        });

        let status = waited.map_err(|e| ProcessError::OutputError {
            command: cmd_line.to_string(),
            message: e.to_string(),
        })?;

        // The child may exit on its own (e.g. SIGPIPE) before the waiter sees the flag.
        if let Some(limit) = limit
            && overflow.load(Ordering::Acquire)
        {
            return Err(ProcessError::OutputLimitExceeded {
                command: cmd_line.to_string(),
                limit,
            });
        }

        match status {
            Ok(status) => Ok(ProcessOutput::new(
                status.code().unwrap_or(-1),
                stdout,
                stderr,
            )),
            Err(Stop::Timeout(timeout)) => Err(ProcessError::Timeout {
                command: cmd_line.to_string(),
                timeout_secs: timeout.as_secs(),
            }),
            Err(Stop::Cancelled) => Err(ProcessError::Cancelled {
                command: cmd_line.to_string(),
            }),
            Err(Stop::OutputLimit(limit)) => Err(ProcessError::OutputLimitExceeded {
                command: cmd_line.to_string(),
                limit,
            }),
        }
    }

    /// Polls the child until it exits or one of the guards trips.
    fn wait(
        &self,
        name: &str,
        child: &mut Child,
        overflow: &AtomicBool,
    ) -> std::io::Result<Result<ExitStatus, Stop>> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Ok(status));
            }

            let stop = if overflow.load(Ordering::Acquire) {
                self.output_limit_bytes().map(Stop::OutputLimit)
            } else if self.cancellation().is_some_and(|t| t.is_cancelled()) {
                Some(Stop::Cancelled)
            } else {
                self.timeout_duration()
                    .filter(|timeout| started.elapsed() >= *timeout)
                    .map(Stop::Timeout)
            };

            if let Some(stop) = stop {
                match &stop {
                    Stop::Timeout(timeout) => {
                        warn!(process = %name, timeout = ?timeout, "process timed out");
                    }
                    Stop::Cancelled => {
                        warn!(process = %name, "cancellation requested, terminating process");
                    }
                    Stop::OutputLimit(limit) => {
                        warn!(process = %name, limit, "output limit exceeded");
                    }
                }
                terminate(child);
                return Ok(Err(stop));
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kills and reaps a child; errors mean it already exited.
fn terminate(child: &mut Child) {
    child.kill().ok();
    child.wait().ok();
}

/// Reads stdout up to `limit` bytes; flags `overflow` when more arrives.
fn read_stdout(mut out: ChildStdout, limit: Option<usize>, overflow: &AtomicBool) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match out.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                if limit.is_some_and(|limit| buffer.len() + n > limit) {
                    overflow.store(true, Ordering::Release);
                    break;
                }
                buffer.extend_from_slice(&chunk[..n]);
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                warn!(error = %e, "error reading stdout");
                break;
            }
        }
    }
    buffer
}

/// Drains stderr line by line, tracing each line and keeping the tail.
pub(super) fn read_stderr(err: impl Read, name: &str) -> String {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let mut dropped = 0usize;
    let mut reader = BufReader::new(err);
    let mut line = Vec::new();
    loop {
        line.clear();
        match (&mut reader)
            .take(STDERR_LINE_BYTES as u64)
            .read_until(b'\n', &mut line)
        {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                let text = text.trim_end_matches(['\r', '\n']);
                trace!(process = %name, stream = "stderr", line = %text, "output");
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                    dropped += 1;
                }
                tail.push_back(text.to_string());
            }
            Err(e) => {
                warn!(process = %name, stream = "stderr", error = %e, "error reading stream");
                break;
            }
        }
    }
    if dropped > 0 {
        trace!(process = %name, dropped, "older stderr lines not kept");
    }
    Vec::from(tail).join("\n")
}
