// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, ToolsConfig, repositories
//! Repositories: name -> RepositoryConfig { scm, url, login, password }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;
use crate::scm::adapter::ConnectionConfig;

/// Backend identifier used when a repository does not name one.
pub const DEFAULT_SCM: &str = "subversion";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_log: false,
        }
    }
}

/// External tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Subversion client executable.
    pub svn: PathBuf,
    /// Deadline for a single tool invocation, 0 disables it.
    pub timeout_secs: u64,
    /// Maximum bytes captured from a tool's stdout, 0 disables the cap.
    pub max_output_bytes: usize,
    /// Label of the encoding used to decode diff output.
    pub encoding: String,
    /// Pass `--non-interactive` so the client never prompts.
    pub non_interactive: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            svn: PathBuf::from("svn"),
            timeout_secs: 300,
            max_output_bytes: 64 * 1024 * 1024,
            encoding: "utf-8".to_string(),
            non_interactive: true,
        }
    }
}

impl ToolsConfig {
    /// Returns the invocation deadline, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    /// Returns the stdout cap, if any.
    #[must_use]
    pub const fn output_limit(&self) -> Option<usize> {
        if self.max_output_bytes == 0 {
            None
        } else {
            Some(self.max_output_bytes)
        }
    }
}

/// One configured repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Backend identifier (e.g. "subversion").
    #[serde(default = "default_scm")]
    pub scm: String,
    /// Repository root location.
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_scm() -> String {
    DEFAULT_SCM.to_string()
}

impl RepositoryConfig {
    /// Creates a Subversion repository entry for an ad-hoc URL.
    #[must_use]
    pub fn subversion(url: impl Into<String>) -> Self {
        Self {
            scm: default_scm(),
            url: url.into(),
            login: None,
            password: None,
        }
    }

    /// Builds the immutable connection settings for an adapter.
    #[must_use]
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(
            self.url.clone(),
            self.login.clone(),
            self.password.clone(),
        )
    }
}

/// Named repositories.
pub type Repositories = BTreeMap<String, RepositoryConfig>;
