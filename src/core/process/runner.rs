// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run()
//!   |
//!   v
//! resolve_program()  bare name --> which (cached)
//!   |                missing   --> ExecutableNotFound
//!   v
//! build_command()    argv, env, stdin=null, stdout/stderr=piped
//!   |
//!   v
//! spawn()            NotFound/PermissionDenied --> ExecutableNotFound
//!   |
//!   v
//! collect()          readers + wait (deadline / cancel / cap)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! A non-zero exit status is returned in the output, never as an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging), with secret
    /// arguments masked.
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for (index, arg) in self.args_slice().iter().enumerate() {
            if self.is_secret_arg(index) {
                cmd.push_str(" ***");
            } else if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, blocking until it exits or is killed.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `ExecutableNotFound` if the program cannot be located or started.
    /// - `SpawnFailed` for any other spawn failure.
    /// - `Timeout`, `Cancelled` or `OutputLimitExceeded` if the process had
    ///   to be killed.
    /// - `OutputError` if waiting on the process fails.
    pub fn run(self) -> Result<ProcessOutput, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        let program = self.resolve_program()?;
        debug!(cmd = %cmd_line, "exec");

        let child = self
            .build_command(&program)
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    ProcessError::ExecutableNotFound {
                        name: self.program().display().to_string(),
                    }
                }
                _ => ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                },
            })?;

        trace!(process = %name, pid = child.id(), "spawned");

        let output = self.collect(&name, &cmd_line, child)?;

        if output.success() {
            trace!(process = %name, exit_code = output.exit_code(), "completed");
        } else {
            debug!(
                process = %name,
                exit_code = output.exit_code(),
                stderr = %output.stderr().trim(),
                "non-zero exit"
            );
        }
        Ok(output)
    }

    /// Resolves a bare program name through PATH; paths are used as given.
    fn resolve_program(&self) -> Result<PathBuf, ProcessError> {
        let program = self.program();
        if program.components().count() > 1 || program.is_absolute() {
            return Ok(program.clone());
        }
        Self::find(&program.to_string_lossy()).ok_or_else(|| ProcessError::ExecutableNotFound {
            name: program.display().to_string(),
        })
    }

    /// Builds the std Command from this builder's configuration.
    fn build_command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);
        command.args(self.args_slice());
        command.envs(self.environment());
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command
    }
}
