// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository query arguments.
//!
//! # Subcommands
//!
//! ```text
//! entry <repo> [path] [-r REV]
//! ls    <repo> [path] [-r REV]
//! log   <repo> [path] [--from REV] [--to REV] [-v]
//! diff  <repo> <path> -r REV [--to REV]
//! cat   <repo> <path> [-r REV]
//! ```
//!
//! `<repo>` is a configured repository name or a URL. A revision `<= 0`
//! means the default for that position.

use clap::{Args, Subcommand};

/// Repository selection shared by every query.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Configured repository name, or a repository URL.
    #[arg(value_name = "REPO")]
    pub repository: String,

    /// Prints JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `entry` and `ls`.
#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Path relative to the repository root.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Revision to query (default: HEAD).
    #[arg(short = 'r', long = "revision", value_name = "REV", allow_negative_numbers = true)]
    pub revision: Option<i64>,
}

/// Arguments for `log`.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Path relative to the repository root.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Newest revision of the range (default: HEAD).
    #[arg(long = "from", value_name = "REV", allow_negative_numbers = true)]
    pub from: Option<i64>,

    /// Oldest revision of the range (default: 1).
    #[arg(long = "to", value_name = "REV", allow_negative_numbers = true)]
    pub to: Option<i64>,

    /// Includes the changed paths of every revision.
    #[arg(short = 'v', long = "with-paths", visible_alias = "verbose")]
    pub with_paths: bool,
}

/// Arguments for `diff`.
#[derive(Debug, Clone, Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Path relative to the repository root.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Revision whose changes are shown.
    #[arg(short = 'r', long = "revision", value_name = "REV", allow_negative_numbers = true)]
    pub revision: i64,

    /// Revision to compare against (default: REV - 1).
    #[arg(long = "to", value_name = "REV", allow_negative_numbers = true)]
    pub to: Option<i64>,
}

/// Arguments for `cat`.
#[derive(Debug, Clone, Args)]
pub struct CatArgs {
    /// Configured repository name, or a repository URL.
    #[arg(value_name = "REPO")]
    pub repository: String,

    /// Path of the file relative to the repository root.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Revision to read (default: HEAD).
    #[arg(short = 'r', long = "revision", value_name = "REV", allow_negative_numbers = true)]
    pub revision: Option<i64>,
}

/// Repository queries.
#[derive(Debug, Clone, Subcommand)]
pub enum RepoCommand {
    /// Shows one file or directory.
    Entry(PathArgs),

    /// Lists a directory, directories first.
    #[command(visible_alias = "list")]
    Ls(PathArgs),

    /// Shows history, newest first.
    Log(LogArgs),

    /// Shows the changes of one revision as a unified diff.
    Diff(DiffArgs),

    /// Prints the content of a file.
    Cat(CatArgs),
}

impl RepoCommand {
    /// The repository name or URL this query targets.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Entry(args) | Self::Ls(args) => &args.repo.repository,
            Self::Log(args) => &args.repo.repository,
            Self::Diff(args) => &args.repo.repository,
            Self::Cat(args) => &args.repository,
        }
    }
}
