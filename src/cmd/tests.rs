// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{TimeZone, Utc};
use clap::Parser;

use super::config::format_backends;
use super::repo::{Lookup, execute, format_entries, format_revisions};
use crate::cli::repo::RepoCommand;
use crate::cli::{Cli, Command};
use crate::error::{ProcessError, ScmResult};
use crate::scm::adapter::{ConnectionConfig, LogOptions, RepositoryAdapter};
use crate::scm::model::{ChangeAction, Entries, Entry, EntryKind, PathChange, Revision};
use crate::scm::registry::AdapterRegistry;

fn revision(identifier: u64, author: &str, message: &str) -> Revision {
    Revision {
        identifier,
        author: author.to_string(),
        time: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
        message: message.to_string(),
        paths: None,
    }
}

fn entry(name: &str, kind: EntryKind, size: u64) -> Entry {
    Entry {
        name: name.to_string(),
        path: format!("trunk/{name}"),
        kind,
        size,
        last_revision: Some(revision(7, "jdoe", "")),
    }
}

/// Adapter answering from fixed records; paths starting with "missing" are
/// absent and "broken" reports an unavailable tool.
struct StubAdapter {
    connection: ConnectionConfig,
}

impl StubAdapter {
    fn new() -> Self {
        Self {
            connection: ConnectionConfig::new("svn://h/r", None, None),
        }
    }

    fn check(path: &str) -> ScmResult<bool> {
        if path == "broken" {
            return Err(ProcessError::ExecutableNotFound {
                name: "svn".to_string(),
            }
            .into());
        }
        Ok(!path.starts_with("missing"))
    }
}

impl RepositoryAdapter for StubAdapter {
    fn kind(&self) -> &'static str {
        "stub"
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    fn entry(&self, path: &str, _identifier: Option<i64>) -> ScmResult<Option<Entry>> {
        Ok(Self::check(path)?.then(|| entry("README", EntryKind::File, 42)))
    }

    fn entries(&self, path: &str, _identifier: Option<i64>) -> ScmResult<Option<Entries>> {
        Ok(Self::check(path)?.then(|| {
            Entries::from(vec![
                entry("lib", EntryKind::Directory, 0),
                entry("README", EntryKind::File, 42),
            ])
        }))
    }

    fn revisions(
        &self,
        path: &str,
        _identifier_from: Option<i64>,
        _identifier_to: Option<i64>,
        options: LogOptions,
    ) -> ScmResult<Option<Vec<Revision>>> {
        Ok(Self::check(path)?.then(|| {
            let mut newest = revision(12, "jdoe", "Fix the build");
            if options.with_paths {
                newest.paths = Some(vec![PathChange {
                    action: ChangeAction::Modified,
                    path: "/trunk/a.c".to_string(),
                    copy_from: None,
                }]);
            }
            vec![newest]
        }))
    }

    fn diff(
        &self,
        path: &str,
        _identifier_from: i64,
        _identifier_to: Option<i64>,
    ) -> ScmResult<Option<Vec<String>>> {
        Ok(Self::check(path)?.then(|| vec!["-old\r\n".to_string(), "+new\n".to_string()]))
    }

    fn cat(&self, path: &str, _identifier: Option<i64>) -> ScmResult<Option<Vec<u8>>> {
        Ok(Self::check(path)?.then(|| b"raw\x00bytes".to_vec()))
    }
}

fn run(args: &[&str]) -> (Lookup, String) {
    let Some(Command::Repo(command)) = Cli::try_parse_from(args.iter().copied()).unwrap().command else {
        panic!("expected a repository command");
    };
    let mut out = Vec::new();
    let lookup = execute(&command, &StubAdapter::new(), &mut out).unwrap();
    (lookup, String::from_utf8_lossy(&out).into_owned())
}

fn run_err(args: &[&str]) -> anyhow::Error {
    let Some(Command::Repo(command)) = Cli::try_parse_from(args.iter().copied()).unwrap().command else {
        panic!("expected a repository command");
    };
    execute(&command, &StubAdapter::new(), &mut Vec::new()).unwrap_err()
}

#[test]
fn test_entry_text() {
    let (lookup, out) = run(&["scm", "entry", "main", "trunk/README"]);
    assert_eq!(lookup, Lookup::Found);
    insta::assert_snapshot!(out, @r"
    name:     README
    path:     trunk/README
    kind:     file
    size:     42
    revision: 7
    author:   jdoe
    date:     2024-03-02 09:00:00 +0000
    ");
}

#[test]
fn test_ls_text() {
    let (_, out) = run(&["scm", "ls", "main", "trunk"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" lib/"));
    assert!(lines[1].ends_with(" README"));
    assert!(lines[1].contains(" 42 "));
}

#[test]
fn test_ls_json() {
    let (_, out) = run(&["scm", "ls", "main", "trunk", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["name"], "lib");
    assert_eq!(value[0]["kind"], "dir");
    assert_eq!(value[1]["size"], 42);
    assert_eq!(value[1]["last_revision"]["identifier"], 7);
}

#[test]
fn test_log_text_with_paths() {
    let (_, out) = run(&["scm", "log", "main", "trunk", "-v"]);
    insta::assert_snapshot!(out, @r"
    ------------------------------------------------------------------------
    r12 | jdoe | 2024-03-02 09:00:00 +0000 | 1 line
    Changed paths:
       M /trunk/a.c

    Fix the build
    ------------------------------------------------------------------------
    ");
}

#[test]
fn test_diff_and_cat_are_raw() {
    let (_, out) = run(&["scm", "diff", "main", "a.c", "-r", "42"]);
    assert_eq!(out, "-old\r\n+new\n");

    let (_, out) = run(&["scm", "diff", "main", "a.c", "-r", "42", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0], "-old\r\n");

    let Some(Command::Repo(command)) = Cli::try_parse_from(["scm", "cat", "main", "a.c"])
        .unwrap()
        .command
    else {
        panic!("expected cat");
    };
    let mut out = Vec::new();
    execute(&command, &StubAdapter::new(), &mut out).unwrap();
    assert_eq!(out, b"raw\x00bytes");
}

#[test]
fn test_absence_writes_nothing() {
    for args in [
        &["scm", "entry", "main", "missing"][..],
        &["scm", "ls", "main", "missing/dir"],
        &["scm", "log", "main", "missing"],
        &["scm", "diff", "main", "missing", "-r", "3"],
        &["scm", "cat", "main", "missing"],
    ] {
        let (lookup, out) = run(args);
        assert_eq!(lookup, Lookup::Absent, "{args:?}");
        assert!(out.is_empty());
    }
}

#[test]
fn test_unavailable_tool_is_an_error() {
    let err = run_err(&["scm", "ls", "main", "broken"]);
    insta::assert_snapshot!(
        err.to_string(),
        @"process error: executable not found: 'svn' (not in PATH)"
    );
}

#[test]
fn test_format_entries_without_revision() {
    let entries = Entries::from(vec![Entry {
        last_revision: None,
        ..entry("orphan", EntryKind::File, 1)
    }]);
    let lines = format_entries(&entries);
    assert!(lines[0].trim_start().starts_with('-'));
    assert!(lines[0].ends_with("orphan"));
}

#[test]
fn test_format_revisions_anonymous_multiline() {
    let lines = format_revisions(&[revision(3, "", "first\nsecond")]);
    assert_eq!(lines[1], "r3 | (no author) | 2024-03-02 09:00:00 +0000 | 2 lines");
    assert_eq!(lines[3..5], ["first", "second"]);
}

#[test]
fn test_format_revisions_copy_source() {
    let mut copied = revision(5, "jdoe", "Branch");
    copied.paths = Some(vec![PathChange {
        action: ChangeAction::Added,
        path: "/branches/stable".to_string(),
        copy_from: Some(("/trunk".to_string(), 4)),
    }]);
    let lines = format_revisions(&[copied]);
    assert_eq!(lines[3], "   A /branches/stable (from /trunk:4)");
}

#[test]
fn test_format_backends() {
    insta::assert_snapshot!(
        format_backends(&AdapterRegistry::builtin()).join("\n"),
        @"subversion (svn)"
    );
}

#[test]
fn test_repo_command_repository() {
    let Some(Command::Repo(command)) = Cli::try_parse_from(["scm", "log", "svn://h/r"])
        .unwrap()
        .command
    else {
        panic!("expected log");
    };
    assert!(matches!(command, RepoCommand::Log(_)));
    assert_eq!(command.repository(), "svn://h/r");
}
