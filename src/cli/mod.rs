// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for scm-adapter using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! scm [global options] <command>
//! version | options | inis | backends
//! entry | ls | log | diff | cat   <repo> ...
//! ```

pub mod global;
pub mod repo;


use crate::cli::global::GlobalOptions;
use crate::cli::repo::RepoCommand;
use clap::{Parser, Subcommand};

/// Read-only version-control repository adapter.
#[derive(Debug, Parser)]
#[command(
    name = "scm",
    author,
    version,
    about = "Read-only version-control repository adapter",
    long_about = "scm-adapter Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Queries Subversion repositories through the svn client:\n\
                  `scm ls https://svn.example.org/repos/main trunk` lists a\n\
                  directory, `scm log main -v` shows history with changed paths.\n\
                  See `scm <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, scm loads `scm.toml` from the current directory if it\n\
                  exists. Additional files can be specified with --ini, those are\n\
                  loaded after it. SCM_* environment variables (e.g.\n\
                  SCM_TOOLS__TIMEOUT_SECS=60) and --set options override files.\n\
                  Use --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by scm.
    Inis,

    /// Lists the supported repository backends.
    Backends,

    #[command(flatten)]
    Repo(RepoCommand),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
