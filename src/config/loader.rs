// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("scm.toml")    skipped when absent
//!   .add_toml_file(--ini)                  must exist
//!   .with_env_prefix("SCM")                SCM_TOOLS__TIMEOUT_SECS=60
//!   .set_option("tools/timeout_secs=60")   --set
//!        |
//!        v
//!    build() --> Config (resolved, validated)
//! ```
//!
//! Later layers override earlier ones; environment variables are applied
//! after every file.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Origin of one configuration layer, as listed by `scm inis`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Layer {
    File(PathBuf),
    OptionalFile(PathBuf),
    Inline,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::OptionalFile(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Collects configuration layers and merges them into a [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    layers: Vec<Layer>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            layers: Vec::new(),
        }
    }

    /// Adds a TOML file; `build()` fails if it is missing or invalid.
    #[must_use]
    pub fn add_toml_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.layers.push(Layer::File(path.to_path_buf()));
        self
    }

    /// Adds a TOML file that is skipped when it does not exist.
    #[must_use]
    pub fn add_toml_file_optional(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.layers.push(Layer::OptionalFile(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.layers.push(Layer::Inline);
        self
    }

    /// Reads `<PREFIX>_SECTION__KEY` variables when building.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Applies a `section/key=value` override as given on the command line.
    ///
    /// Slashes in the key become dots, so `repositories/main/url=...` sets
    /// `repositories.main.url`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the option has no `=` or an
    /// empty key.
    pub fn set_option(mut self, option: &str) -> Result<Self> {
        let (key, value) = option
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "cli".to_string(),
                key: "--set".to_string(),
                message: format!("expected 'section/key=value', got '{option}'"),
            })?;
        let key = key.trim().replace('/', ".");
        self.builder = self
            .builder
            .set_override(key.as_str(), value.trim())
            .with_context(|| format!("invalid --set option '{option}'"))?;
        Ok(self)
    }

    /// Merges every layer, then resolves and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, the merged values do not fit [`Config`], or validation fails.
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let mut config: Config = builder
            .build()
            .context("failed to load configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Numbered list of the layers that contribute, in load order.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| format!("{}. {layer}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
