// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio_util::sync::CancellationToken;

use super::adapter::{
    ConnectionConfig, RevisionSpec, resolve_diff_range, resolve_oldest, resolve_revision,
};
use super::invoker::{ProcessInvoker, ToolCommand};
use super::model::{ChangeAction, Entries, Entry, EntryKind, PathChange, Revision};
use super::registry::AdapterRegistry;
use crate::config::types::{RepositoryConfig, ToolsConfig};
use crate::error::ScmError;

fn entry(name: &str, kind: EntryKind) -> Entry {
    Entry {
        name: name.to_string(),
        path: name.to_string(),
        kind,
        size: 0,
        last_revision: None,
    }
}

fn names(entries: &Entries) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

// --- Model ---

#[test]
fn test_sort_groups_directories_before_files() {
    let entries: Entries = vec![
        entry("b", EntryKind::File),
        entry("a", EntryKind::Directory),
        entry("z", EntryKind::Directory),
    ]
    .into();
    let sorted = entries.sort_by_name();
    assert_eq!(names(&sorted), vec!["a", "z", "b"]);
    assert!(sorted.iter().take(2).all(Entry::is_dir));
    assert!(sorted.iter().skip(2).all(Entry::is_file));
}

#[test]
fn test_sort_is_independent_of_input_order() {
    let forward: Entries = ["c.txt", "B", "a.txt", "lib", "Makefile"]
        .iter()
        .map(|n| {
            let kind = if n.contains('.') || *n == "Makefile" {
                EntryKind::File
            } else {
                EntryKind::Directory
            };
            entry(n, kind)
        })
        .collect();
    let mut reversed = forward.clone().into_inner();
    reversed.reverse();

    let a = forward.sort_by_name();
    let b = Entries::from(reversed).sort_by_name();
    assert_eq!(a, b);
    assert_eq!(names(&a), vec!["B", "lib", "Makefile", "a.txt", "c.txt"]);
}

#[test]
fn test_entries_find_and_len() {
    let mut entries = Entries::new();
    assert!(entries.is_empty());
    entries.push(entry("src", EntryKind::Directory));
    entries.push(entry("README", EntryKind::File));
    assert_eq!(entries.len(), 2);
    assert!(entries.find("README").is_some_and(Entry::is_file));
    assert!(entries.find("missing").is_none());
}

#[test]
fn test_entry_kind_tags() {
    assert_eq!("dir".parse::<EntryKind>().unwrap(), EntryKind::Directory);
    assert_eq!("file".parse::<EntryKind>().unwrap(), EntryKind::File);
    insta::assert_snapshot!(
        "symlink".parse::<EntryKind>().unwrap_err().to_string(),
        @"invalid value for 'kind': 'symlink'"
    );
}

#[test]
fn test_change_action_codes() {
    assert_eq!(ChangeAction::from("A"), ChangeAction::Added);
    assert_eq!(ChangeAction::from("D"), ChangeAction::Deleted);
    assert_eq!(ChangeAction::from("X"), ChangeAction::Other("X".to_string()));
    assert_eq!(ChangeAction::Replaced.to_string(), "R");
}

#[test]
fn test_revision_serializes_to_json() {
    let revision = Revision {
        identifier: 12,
        author: "jdoe".to_string(),
        time: Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap(),
        message: "Fix the build".to_string(),
        paths: Some(vec![PathChange {
            action: ChangeAction::Modified,
            path: "/trunk/a.c".to_string(),
            copy_from: None,
        }]),
    };
    insta::assert_snapshot!(
        serde_json::to_string(&revision).unwrap(),
        @r#"{"identifier":12,"author":"jdoe","time":"2024-03-02T09:00:00Z","message":"Fix the build","paths":[{"action":"M","path":"/trunk/a.c"}]}"#
    );
}

#[test]
fn test_entry_kind_serializes_as_tag() {
    assert_eq!(serde_json::to_string(&EntryKind::Directory).unwrap(), r#""dir""#);
    assert_eq!(serde_json::to_string(&EntryKind::File).unwrap(), r#""file""#);
}

// --- Revision resolution ---

#[test]
fn test_resolve_revision_defaults_to_head() {
    assert_eq!(resolve_revision(None), RevisionSpec::Head);
    assert_eq!(resolve_revision(Some(0)), RevisionSpec::Head);
    assert_eq!(resolve_revision(Some(-3)), RevisionSpec::Head);
    assert_eq!(resolve_revision(Some(7)), RevisionSpec::Number(7));
    assert_eq!(RevisionSpec::Head.to_string(), "HEAD");
}

#[test]
fn test_resolve_oldest_defaults_to_one() {
    assert_eq!(resolve_oldest(None), RevisionSpec::Number(1));
    assert_eq!(resolve_oldest(Some(-1)), RevisionSpec::Number(1));
    assert_eq!(resolve_oldest(Some(5)), RevisionSpec::Number(5));
}

#[test]
fn test_resolve_diff_range() {
    assert_eq!(resolve_diff_range(42, None), Some((41, 42)));
    assert_eq!(resolve_diff_range(42, Some(0)), Some((41, 42)));
    assert_eq!(resolve_diff_range(42, Some(10)), Some((10, 42)));
    assert_eq!(resolve_diff_range(1, None), Some((0, 1)));
    assert_eq!(resolve_diff_range(0, Some(5)), None);
    assert_eq!(resolve_diff_range(-4, None), None);
}

// --- Connection ---

#[test]
fn test_connection_login_rules() {
    let anonymous = ConnectionConfig::new("svn://h/r", None, Some("pw".into()));
    assert_eq!(anonymous.login(), None);
    assert_eq!(anonymous.password(), None);

    let empty = ConnectionConfig::new("svn://h/r", Some(String::new()), Some("pw".into()));
    assert_eq!(empty.login(), None);

    let no_password = ConnectionConfig::new("svn://h/r", Some("jdoe".into()), None);
    assert_eq!(no_password.login(), Some("jdoe"));
    assert_eq!(no_password.password(), Some(""));
}

#[test]
fn test_connection_debug_hides_password() {
    let connection = ConnectionConfig::new("svn://h/r", Some("jdoe".into()), Some("s3cret".into()));
    let debug = format!("{connection:?}");
    assert!(debug.contains("jdoe"));
    assert!(!debug.contains("s3cret"));
}

// --- Invoker ---

#[test]
fn test_process_invoker_from_tools() {
    let tools = ToolsConfig {
        timeout_secs: 30,
        max_output_bytes: 0,
        ..ToolsConfig::default()
    };
    let invoker = ProcessInvoker::from_tools(&tools, CancellationToken::new());
    assert_eq!(invoker.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(invoker.output_limit(), None);
}

#[test]
fn test_tool_command_masks_secrets() {
    let command = ToolCommand::new("svn")
        .args(["info", "--password"])
        .secret_arg("hunter2")
        .arg("svn://h/r/");
    assert!(command.is_secret(2));
    assert!(!command.is_secret(3));
    insta::assert_snapshot!(command.into_process().command_line(), @"svn info --password *** svn://h/r/");
}

#[test]
fn test_process_invoker_reports_missing_tool() {
    use super::invoker::CommandInvoker;

    let invoker = ProcessInvoker::default();
    let err = invoker
        .run(ToolCommand::new("scm-adapter-no-such-svn").arg("info"))
        .unwrap_err();
    assert!(ScmError::from(err).is_command_unavailable());
}

// --- Registry ---

#[test]
fn test_builtin_registry() {
    let registry = AdapterRegistry::builtin();
    assert_eq!(registry.kinds().collect::<Vec<_>>(), vec!["subversion"]);
    assert_eq!(registry.resolve("svn"), Some("subversion"));
    assert_eq!(registry.resolve(" Subversion "), Some("subversion"));
    assert_eq!(registry.resolve("git"), None);
    assert_eq!(registry.aliases().collect::<Vec<_>>(), vec![("svn", "subversion")]);
}

#[test]
fn test_registry_creates_adapter_by_alias() {
    let registry = AdapterRegistry::builtin();
    let repository = RepositoryConfig {
        scm: "svn".to_string(),
        ..RepositoryConfig::subversion("https://svn.example.org/repos/main")
    };
    let adapter = registry
        .create(&repository, &ToolsConfig::default(), Arc::new(ProcessInvoker::default()))
        .unwrap();
    assert_eq!(adapter.kind(), "subversion");
    assert_eq!(
        adapter.connection().base_location(),
        "https://svn.example.org/repos/main"
    );
}

#[test]
fn test_registry_rejects_unknown_backend() {
    let registry = AdapterRegistry::builtin();
    let repository = RepositoryConfig {
        scm: "mercurial".to_string(),
        ..RepositoryConfig::subversion("https://hg.example.org/repo")
    };
    let Err(err) = registry.create(
        &repository,
        &ToolsConfig::default(),
        Arc::new(ProcessInvoker::default()),
    ) else {
        panic!("expected an unknown backend error");
    };
    assert!(matches!(err, ScmError::UnknownBackend(_)));
    insta::assert_snapshot!(err.to_string(), @"unknown repository backend: mercurial");
}

#[test]
fn test_empty_registry_knows_nothing() {
    assert_eq!(AdapterRegistry::new().kinds().count(), 0);
}
