// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. scm.toml (cwd, optional)
//! 3. --ini FILE...
//! 4. SCM_* env vars
//! 5. --set section/key=value
//! ```
//!
//! # Example
//!
//! ```toml
//! [tools]
//! svn = "/usr/bin/svn"
//! timeout_secs = 60
//!
//! [repositories.main]
//! url = "https://svn.example.org/repos/main"
//! login = "jdoe"
//! password = "secret"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};
use crate::utility::encoding::TextEncoding;

use loader::ConfigLoader;
use types::{GlobalConfig, Repositories, RepositoryConfig, ToolsConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// External tool settings.
    pub tools: ToolsConfig,
    /// Configured repositories by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub repositories: Repositories,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scm_adapter::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("scm.toml")
    ///     .with_env_prefix("SCM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Looks up a repository by name, or treats `name` as an ad-hoc
    /// Subversion URL when it contains a scheme separator.
    #[must_use]
    pub fn repository(&self, name: &str) -> Option<RepositoryConfig> {
        self.repositories.get(name).cloned().or_else(|| {
            name.contains("://")
                .then(|| RepositoryConfig::subversion(name.trim_end_matches('/')))
        })
    }

    /// Validate configuration after all sources are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository has no URL or the tool encoding label
    /// is not recognized.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        for (name, repo) in &mut self.repositories {
            repo.url = repo.url.trim_end_matches('/').to_string();
            if repo.url.is_empty() {
                return Err(ConfigError::MissingKey {
                    section: format!("repositories.{name}"),
                    key: "url".to_string(),
                }
                .into());
            }
        }

        TextEncoding::from_label(&self.tools.encoding)?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Passwords are shown as `[hidden]`. Output is sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_repository_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.svn".into(), self.tools.svn.display().to_string());
        options.insert(
            "tools.timeout_secs".into(),
            self.tools.timeout_secs.to_string(),
        );
        options.insert(
            "tools.max_output_bytes".into(),
            self.tools.max_output_bytes.to_string(),
        );
        options.insert("tools.encoding".into(), self.tools.encoding.clone());
        options.insert(
            "tools.non_interactive".into(),
            self.tools.non_interactive.to_string(),
        );
    }

    fn format_repository_options(&self, options: &mut BTreeMap<String, String>) {
        for (name, repo) in &self.repositories {
            let prefix = format!("repositories.{name}");
            options.insert(format!("{prefix}.scm"), repo.scm.clone());
            options.insert(format!("{prefix}.url"), repo.url.clone());
            if let Some(login) = &repo.login {
                options.insert(format!("{prefix}.login"), login.clone());
            }
            if repo.password.is_some() {
                options.insert(format!("{prefix}.password"), "[hidden]".into());
            }
        }
    }
}
