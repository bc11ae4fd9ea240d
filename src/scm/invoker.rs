// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command invocation seam between adapters and processes.
//!
//! ```text
//! adapter --ToolCommand--> CommandInvoker::run --> ProcessOutput
//!                               |
//!                         ProcessInvoker
//!                         (ProcessBuilder: deadline, cap, cancel)
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bon::Builder;
use tokio_util::sync::CancellationToken;

use crate::config::types::ToolsConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;

/// Program plus argument vector for one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    secret_args: BTreeSet<usize>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            secret_args: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an argument that must not appear in logs.
    #[must_use]
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.insert(self.args.len());
        self.arg(arg)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn is_secret(&self, index: usize) -> bool {
        self.secret_args.contains(&index)
    }

    /// Converts into a process builder, keeping secret arguments masked.
    ///
    /// The process is named after the program and its subcommand, e.g.
    /// `svn log`.
    #[must_use]
    pub fn into_process(self) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&self.program);
        if let (Some(stem), Some(subcommand)) = (self.program.file_stem(), self.args.first()) {
            builder = builder.name(format!("{} {subcommand}", stem.to_string_lossy()));
        }
        for (index, arg) in self.args.into_iter().enumerate() {
            builder = if self.secret_args.contains(&index) {
                builder.secret_arg(arg)
            } else {
                builder.arg(arg)
            };
        }
        builder
    }
}

/// Runs external tool commands.
///
/// `run` fails only when the command could not be run to completion; a
/// non-zero exit status is reported in the returned output.
pub trait CommandInvoker: Send + Sync {
    /// Runs `command` and captures its output.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when the program cannot be
    /// located or started, and other `ProcessError` variants when the run was
    /// aborted.
    fn run(&self, command: ToolCommand) -> Result<ProcessOutput, ProcessError>;
}

/// Invoker that spawns real processes.
#[derive(Debug, Clone, Default, Builder)]
pub struct ProcessInvoker {
    #[builder(setters(name = with_timeout))]
    timeout: Option<Duration>,
    #[builder(setters(name = with_output_limit))]
    output_limit: Option<usize>,
    #[builder(setters(name = with_cancel_token), default)]
    cancel: CancellationToken,
}

impl ProcessInvoker {
    /// Creates an invoker from `[tools]` settings sharing `cancel`.
    #[must_use]
    pub fn from_tools(tools: &ToolsConfig, cancel: CancellationToken) -> Self {
        Self::builder()
            .maybe_with_timeout(tools.timeout())
            .maybe_with_output_limit(tools.output_limit())
            .with_cancel_token(cancel)
            .build()
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub const fn output_limit(&self) -> Option<usize> {
        self.output_limit
    }
}

impl CommandInvoker for ProcessInvoker {
    fn run(&self, command: ToolCommand) -> Result<ProcessOutput, ProcessError> {
        let mut builder = command
            .into_process()
            .cancel_token(self.cancel.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(limit) = self.output_limit {
            builder = builder.output_limit(limit);
        }
        builder.run()
    }
}
