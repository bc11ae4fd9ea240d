// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use scm_adapter::cli::repo::RepoCommand;
use scm_adapter::cli::{Command, try_parse_from};

fn repo(args: &[&str]) -> RepoCommand {
    match try_parse_from(args.iter().copied()).unwrap().command {
        Some(Command::Repo(command)) => command,
        other => panic!("expected a repository command, got {other:?}"),
    }
}

// =============================================================================
// Informational Commands
// =============================================================================

#[test]
fn cli_info_commands() {
    for (arg, expected) in [
        ("version", "Version"),
        ("options", "Options"),
        ("inis", "Inis"),
        ("backends", "Backends"),
    ] {
        let cli = try_parse_from(["scm", arg]).unwrap();
        assert_eq!(format!("{:?}", cli.command.unwrap()), expected);
    }
}

#[test]
fn cli_unknown_command_fails() {
    assert!(try_parse_from(["scm", "checkout", "main"]).is_err());
}

#[test]
fn cli_help_is_an_error_result() {
    let err = try_parse_from(["scm", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

// =============================================================================
// Repository Queries
// =============================================================================

#[test]
fn cli_entry_with_url() {
    let RepoCommand::Entry(args) = repo(&[
        "scm",
        "entry",
        "https://svn.example.org/repos/main",
        "trunk/README",
        "--revision",
        "0",
    ]) else {
        panic!("expected entry");
    };
    assert_eq!(args.repo.repository, "https://svn.example.org/repos/main");
    assert_eq!(args.path, "trunk/README");
    assert_eq!(args.revision, Some(0));
}

#[test]
fn cli_global_options_before_command() {
    let cli = try_parse_from([
        "scm",
        "--log-file",
        "/tmp/scm.log",
        "--file-log-level",
        "5",
        "-s",
        "tools/svn=/opt/svn/bin/svn",
        "ls",
        "main",
    ])
    .unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "tools/svn=/opt/svn/bin/svn",
            "global/file_log_level=5",
            "global/log_file=/tmp/scm.log"
        ]
    );
    assert!(matches!(cli.command, Some(Command::Repo(RepoCommand::Ls(_)))));
}

#[test]
fn cli_log_negative_revisions_mean_defaults() {
    let RepoCommand::Log(args) = repo(&["scm", "log", "main", "--from", "-1", "--to", "0", "--json"])
    else {
        panic!("expected log");
    };
    assert_eq!(args.from, Some(-1));
    assert_eq!(args.to, Some(0));
    assert!(args.repo.json);
    assert!(!args.with_paths);
}

#[test]
fn cli_diff_with_explicit_range() {
    let RepoCommand::Diff(args) = repo(&["scm", "diff", "main", "a.c", "-r", "42", "--to", "30"])
    else {
        panic!("expected diff");
    };
    assert_eq!((args.revision, args.to), (42, Some(30)));
}

#[test]
fn cli_cat_requires_path() {
    assert!(try_parse_from(["scm", "cat", "main"]).is_err());
}
