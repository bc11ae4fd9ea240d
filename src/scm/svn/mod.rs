// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subversion backend driven through the `svn` command-line client.
//!
//! ```text
//! operation --> resolve revisions --> SvnCommands (argv) --> CommandInvoker
//!                                                                |
//!              exit != 0 ----------------------------------> Ok(None)
//!              exit == 0 --> parse --(ParseError: warn!)---> Ok(None)
//!                                \------------------------> Ok(Some(_))
//! ```

pub mod args;
pub mod parse;


use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::types::{RepositoryConfig, ToolsConfig};
use crate::error::{ParseError, ScmResult};
use crate::utility::encoding::TextEncoding;

use super::adapter::{
    ConnectionConfig, LogOptions, RepositoryAdapter, resolve_diff_range, resolve_oldest,
    resolve_revision,
};
use super::invoker::{CommandInvoker, ToolCommand};
use super::model::{Entries, Entry, Revision};
use args::SvnCommands;

/// Backend identifier.
pub const SUBVERSION: &str = "subversion";

/// Tool settings for the Subversion backend.
#[derive(Debug, Clone)]
pub struct SvnOptions {
    /// `svn` executable name or path.
    pub program: PathBuf,
    /// Pass `--non-interactive` to every invocation.
    pub non_interactive: bool,
    /// Encoding of `diff` output.
    pub encoding: TextEncoding,
}

impl Default for SvnOptions {
    fn default() -> Self {
        Self {
            program: PathBuf::from("svn"),
            non_interactive: true,
            encoding: TextEncoding::default(),
        }
    }
}

impl SvnOptions {
    /// Reads settings from the `[tools]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding label is unknown.
    pub fn from_tools(tools: &ToolsConfig) -> ScmResult<Self> {
        Ok(Self {
            program: tools.svn.clone(),
            non_interactive: tools.non_interactive,
            encoding: TextEncoding::from_label(&tools.encoding)?,
        })
    }
}

/// Read-only Subversion repository adapter.
pub struct SubversionAdapter {
    connection: ConnectionConfig,
    options: SvnOptions,
    invoker: Arc<dyn CommandInvoker>,
}

impl SubversionAdapter {
    #[must_use]
    pub fn new(
        connection: ConnectionConfig,
        options: SvnOptions,
        invoker: Arc<dyn CommandInvoker>,
    ) -> Self {
        Self {
            connection,
            options,
            invoker,
        }
    }

    /// Registry factory.
    ///
    /// # Errors
    ///
    /// Returns an error if the `[tools]` settings are invalid.
    pub fn create(
        repository: &RepositoryConfig,
        tools: &ToolsConfig,
        invoker: Arc<dyn CommandInvoker>,
    ) -> ScmResult<Box<dyn RepositoryAdapter>> {
        Ok(Box::new(Self::new(
            repository.connection(),
            SvnOptions::from_tools(tools)?,
            invoker,
        )))
    }

    #[must_use]
    pub const fn options(&self) -> &SvnOptions {
        &self.options
    }

    const fn commands(&self) -> SvnCommands<'_> {
        SvnCommands::new(&self.options, &self.connection)
    }

    /// Runs `command`, returning stdout only for a zero exit status.
    fn execute(&self, command: ToolCommand) -> ScmResult<Option<Vec<u8>>> {
        let output = self.invoker.run(command)?;
        if output.success() {
            return Ok(Some(output.into_stdout()));
        }
        debug!(
            exit_code = output.exit_code(),
            stderr = output.stderr().trim(),
            "svn exited non-zero, treating result as absent"
        );
        Ok(None)
    }

    /// Logs a parse failure and turns it into absence.
    fn accept<T>(&self, parsed: Result<T, ParseError>) -> Option<T> {
        parsed
            .inspect_err(|e| {
                warn!(
                    repository = self.connection.base_location(),
                    error = %e,
                    "discarding unparseable svn output"
                );
            })
            .ok()
    }
}

impl RepositoryAdapter for SubversionAdapter {
    fn kind(&self) -> &'static str {
        SUBVERSION
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    fn entry(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Entry>> {
        let revision = resolve_revision(identifier);
        debug!(path, %revision, "svn info");
        let Some(stdout) = self.execute(self.commands().info(path, revision))? else {
            return Ok(None);
        };
        Ok(self.accept(parse::parse_info(&stdout, path)).flatten())
    }

    fn entries(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Entries>> {
        let revision = resolve_revision(identifier);
        debug!(path, %revision, "svn list");
        let Some(stdout) = self.execute(self.commands().list(path, revision))? else {
            return Ok(None);
        };
        Ok(self.accept(parse::parse_list(&stdout, path)))
    }

    fn revisions(
        &self,
        path: &str,
        identifier_from: Option<i64>,
        identifier_to: Option<i64>,
        options: LogOptions,
    ) -> ScmResult<Option<Vec<Revision>>> {
        let from = resolve_revision(identifier_from);
        let to = resolve_oldest(identifier_to);
        debug!(path, %from, %to, with_paths = options.with_paths, "svn log");
        let command = self.commands().log(path, from, to, options.with_paths);
        let Some(stdout) = self.execute(command)? else {
            return Ok(None);
        };
        Ok(self.accept(parse::parse_log(&stdout, options.with_paths)))
    }

    fn diff(
        &self,
        path: &str,
        identifier_from: i64,
        identifier_to: Option<i64>,
    ) -> ScmResult<Option<Vec<String>>> {
        let Some((first, second)) = resolve_diff_range(identifier_from, identifier_to) else {
            debug!(path, identifier_from, "no preceding revision to diff against");
            return Ok(None);
        };
        debug!(path, first, second, "svn diff");
        let stdout = self.execute(self.commands().diff(path, first, second))?;
        Ok(stdout.map(|bytes| self.options.encoding.decode_lines(&bytes)))
    }

    fn cat(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Vec<u8>>> {
        let revision = resolve_revision(identifier);
        debug!(path, %revision, "svn cat");
        self.execute(self.commands().cat(path, revision))
    }
}
