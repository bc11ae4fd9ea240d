// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, ParseError, ProcessError, ScmError, ScmResult, unknown_backend};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "repositories.main".to_string(),
        key: "url".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'url' in section '[repositories.main]'"
    );
}

#[test]
fn test_process_error_display() {
    let err: ScmError = ProcessError::Timeout {
        command: "svn log".to_string(),
        timeout_secs: 30,
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"process error: process 'svn log' timed out after 30 seconds"
    );
}

#[test]
fn test_parse_error_display() {
    let err = ParseError::MissingField {
        document: "list",
        field: "commit",
    };
    insta::assert_snapshot!(err.to_string(), @"list output is missing 'commit'");
}

#[test]
fn test_command_unavailable_detection() {
    let unavailable: ScmError = ProcessError::ExecutableNotFound {
        name: "svn".to_string(),
    }
    .into();
    assert!(unavailable.is_command_unavailable());

    let cancelled: ScmError = ProcessError::Cancelled {
        command: "svn".to_string(),
    }
    .into();
    assert!(!cancelled.is_command_unavailable());

    assert!(!unknown_backend("cvs").is_command_unavailable());
}

#[test]
fn test_unknown_backend_display() {
    insta::assert_snapshot!(unknown_backend("cvs").to_string(), @"unknown repository backend: cvs");
}

#[test]
fn test_scm_error_size() {
    // Box<str> variants are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<ScmError>();
    assert!(size <= 24, "ScmError is {size} bytes, expected <= 24");
}

#[test]
fn test_scm_result_size() {
    let size = std::mem::size_of::<ScmResult<()>>();
    assert!(size <= 24, "ScmResult<()> is {size} bytes, expected <= 24");
}
