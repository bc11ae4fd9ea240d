// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository query commands.
//!
//! ```text
//! RepoCommand --> Config::repository --> AdapterRegistry::create
//!                                              |
//!                        spawn_blocking(execute(adapter, out))
//!                                              |
//!                              Lookup::Found | Lookup::Absent
//! ```

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::repo::RepoCommand;
use crate::config::Config;
use crate::error::Result;
use crate::scm::adapter::{LogOptions, RepositoryAdapter};
use crate::scm::invoker::ProcessInvoker;
use crate::scm::model::{Entries, Entry, Revision};
use crate::scm::registry::AdapterRegistry;

const SEPARATOR: &str =
    "------------------------------------------------------------------------";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Outcome of a query that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    /// The repository reported nothing at the requested path or revision.
    Absent,
}

/// Main handler for repository queries.
///
/// # Errors
///
/// Returns an error if the repository is unknown, the backend cannot be
/// created, the tool is unavailable or was killed, or writing output fails.
pub async fn run_repo_command(
    command: RepoCommand,
    config: &Config,
    cancel: CancellationToken,
) -> Result<Lookup> {
    let repository = config.repository(command.repository()).ok_or_else(|| {
        anyhow!(
            "unknown repository '{}': not configured and not a URL",
            command.repository()
        )
    })?;

    let invoker = Arc::new(ProcessInvoker::from_tools(&config.tools, cancel));
    let adapter: Arc<dyn RepositoryAdapter> = AdapterRegistry::builtin()
        .create(&repository, &config.tools, invoker)?
        .into();

    tokio::task::spawn_blocking(move || {
        execute(&command, adapter.as_ref(), &mut std::io::stdout().lock())
    })
    .await
    .context("repository query task failed")?
}

/// Runs `command` against `adapter`, writing the result to `out`.
///
/// # Errors
///
/// Returns an error if the adapter fails or writing output fails.
pub fn execute(
    command: &RepoCommand,
    adapter: &dyn RepositoryAdapter,
    out: &mut dyn Write,
) -> Result<Lookup> {
    match command {
        RepoCommand::Entry(args) => {
            let entry = adapter.entry(&args.path, args.revision)?;
            emit(out, entry.as_ref(), args.repo.json, format_entry)
        }
        RepoCommand::Ls(args) => {
            let entries = adapter.entries(&args.path, args.revision)?;
            emit(out, entries.as_ref(), args.repo.json, format_entries)
        }
        RepoCommand::Log(args) => {
            let options = LogOptions {
                with_paths: args.with_paths,
            };
            let revisions = adapter.revisions(&args.path, args.from, args.to, options)?;
            emit(out, revisions.as_deref(), args.repo.json, format_revisions)
        }
        RepoCommand::Diff(args) => {
            let lines = adapter.diff(&args.path, args.revision, args.to)?;
            if args.repo.json {
                emit(out, lines.as_deref(), true, <[String]>::to_vec)
            } else {
                write_raw(out, lines.map(|lines| lines.concat().into_bytes()))
            }
        }
        RepoCommand::Cat(args) => write_raw(out, adapter.cat(&args.path, args.revision)?),
    }
}

/// Writes tool output unchanged; diff lines carry their own terminators.
fn write_raw(out: &mut dyn Write, content: Option<Vec<u8>>) -> Result<Lookup> {
    let Some(content) = content else {
        return Ok(Lookup::Absent);
    };
    out.write_all(&content)?;
    out.flush()?;
    Ok(Lookup::Found)
}

fn emit<T>(
    out: &mut dyn Write,
    value: Option<&T>,
    json: bool,
    format: impl Fn(&T) -> Vec<String>,
) -> Result<Lookup>
where
    T: Serialize + ?Sized,
{
    let Some(value) = value else {
        return Ok(Lookup::Absent);
    };
    if json {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        for line in format(value) {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(Lookup::Found)
}

fn revision_column(entry: &Entry) -> (String, &str, String) {
    entry.last_revision.as_ref().map_or_else(
        || ("-".to_string(), "", String::new()),
        |r| {
            (
                r.identifier.to_string(),
                r.author.as_str(),
                r.time.format(DATE_FORMAT).to_string(),
            )
        },
    )
}

/// Renders one entry as `key: value` lines.
#[must_use]
pub fn format_entry(entry: &Entry) -> Vec<String> {
    let (revision, author, date) = revision_column(entry);
    vec![
        format!("name:     {}", entry.name),
        format!("path:     {}", entry.path),
        format!("kind:     {}", entry.kind),
        format!("size:     {}", entry.size),
        format!("revision: {revision}"),
        format!("author:   {author}"),
        format!("date:     {date}"),
    ]
}

/// Renders a listing, one entry per line, directories with a trailing `/`.
#[must_use]
pub fn format_entries(entries: &Entries) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let (revision, author, date) = revision_column(entry);
            let suffix = if entry.is_dir() { "/" } else { "" };
            format!(
                "{revision:>7} {author:<12} {size:>10} {date:<25} {name}{suffix}",
                size = entry.size,
                name = entry.name,
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Renders history in the layout of `svn log`.
#[must_use]
pub fn format_revisions(revisions: &[Revision]) -> Vec<String> {
    let mut lines = vec![SEPARATOR.to_string()];
    for revision in revisions {
        let message_lines = revision.message.lines().count();
        lines.push(format!(
            "r{} | {} | {} | {} line{}",
            revision.identifier,
            if revision.author.is_empty() {
                "(no author)"
            } else {
                &revision.author
            },
            revision.time.format(DATE_FORMAT),
            message_lines,
            if message_lines == 1 { "" } else { "s" },
        ));
        if let Some(paths) = &revision.paths {
            lines.push("Changed paths:".to_string());
            for change in paths {
                match &change.copy_from {
                    Some((from, rev)) => lines.push(format!(
                        "   {} {} (from {from}:{rev})",
                        change.action, change.path
                    )),
                    None => lines.push(format!("   {} {}", change.action, change.path)),
                }
            }
        }
        lines.push(String::new());
        lines.extend(revision.message.lines().map(str::to_string));
        lines.push(SEPARATOR.to_string());
    }
    lines
}
