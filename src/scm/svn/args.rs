// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Argument vectors for `svn` subcommands.

use crate::scm::adapter::{ConnectionConfig, RevisionSpec};
use crate::scm::invoker::ToolCommand;

use super::SvnOptions;

/// Characters never passed through to a target.
pub const STRIPPED_CHARS: [char; 4] = ['"', '\'', '<', '>'];

/// Builds the repository target for `path` below `base`.
///
/// The result is passed as one argv element, never through a shell. A
/// target containing `@` gets a trailing `@` so Subversion does not read the
/// suffix as a peg revision.
#[must_use]
pub fn target(base: &str, path: &str) -> String {
    let mut target: String = format!("{base}/{path}")
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();
    if target.contains('@') {
        target.push('@');
    }
    target
}

/// Builds `svn` command lines for one repository.
pub(super) struct SvnCommands<'a> {
    options: &'a SvnOptions,
    connection: &'a ConnectionConfig,
}

impl<'a> SvnCommands<'a> {
    pub(super) const fn new(options: &'a SvnOptions, connection: &'a ConnectionConfig) -> Self {
        Self {
            options,
            connection,
        }
    }

    /// `svn info --xml -r REV TARGET`
    pub(super) fn info(&self, path: &str, revision: RevisionSpec) -> ToolCommand {
        self.finish(
            self.subcommand("info")
                .args(["--xml", "-r"])
                .arg(revision.to_string()),
            path,
        )
    }

    /// `svn list --xml -r REV TARGET`
    pub(super) fn list(&self, path: &str, revision: RevisionSpec) -> ToolCommand {
        self.finish(
            self.subcommand("list")
                .args(["--xml", "-r"])
                .arg(revision.to_string()),
            path,
        )
    }

    /// `svn log --xml -r FROM:TO [--verbose] TARGET`
    pub(super) fn log(
        &self,
        path: &str,
        from: RevisionSpec,
        to: RevisionSpec,
        verbose: bool,
    ) -> ToolCommand {
        let mut command = self
            .subcommand("log")
            .args(["--xml", "-r"])
            .arg(format!("{from}:{to}"));
        if verbose {
            command = command.arg("--verbose");
        }
        self.finish(command, path)
    }

    /// `svn diff -r FIRST:SECOND TARGET`
    pub(super) fn diff(&self, path: &str, first: u64, second: u64) -> ToolCommand {
        self.finish(
            self.subcommand("diff")
                .arg("-r")
                .arg(format!("{first}:{second}")),
            path,
        )
    }

    /// `svn cat -r REV TARGET`
    pub(super) fn cat(&self, path: &str, revision: RevisionSpec) -> ToolCommand {
        self.finish(
            self.subcommand("cat").arg("-r").arg(revision.to_string()),
            path,
        )
    }

    fn subcommand(&self, name: &str) -> ToolCommand {
        ToolCommand::new(&self.options.program).arg(name)
    }

    fn finish(&self, mut command: ToolCommand, path: &str) -> ToolCommand {
        if self.options.non_interactive {
            command = command.arg("--non-interactive");
        }
        if let Some(login) = self.connection.login() {
            // TODO: switch to --password-from-stdin (svn >= 1.10) so the
            // password stays out of the process table.
            command = command
                .arg("--username")
                .arg(login)
                .arg("--password")
                .secret_arg(self.connection.password().unwrap_or_default())
                .arg("--no-auth-cache");
        }
        command.arg(target(self.connection.base_location(), path))
    }
}
