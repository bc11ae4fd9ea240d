// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend selection by identifier.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::types::{RepositoryConfig, ToolsConfig};
use crate::error::{ScmResult, unknown_backend};

use super::adapter::RepositoryAdapter;
use super::invoker::CommandInvoker;
use super::svn::{SUBVERSION, SubversionAdapter};

/// Builds an adapter for one configured repository.
pub type AdapterFactory = fn(
    &RepositoryConfig,
    &ToolsConfig,
    Arc<dyn CommandInvoker>,
) -> ScmResult<Box<dyn RepositoryAdapter>>;

/// Maps backend identifiers (and aliases) to adapter factories.
///
/// Identifiers are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    factories: BTreeMap<String, AdapterFactory>,
    aliases: BTreeMap<String, String>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in backend.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SUBVERSION, SubversionAdapter::create);
        registry.alias("svn", SUBVERSION);
        registry
    }

    /// Registers (or replaces) the factory for `kind`.
    pub fn register(&mut self, kind: &str, factory: AdapterFactory) {
        self.factories.insert(kind.to_ascii_lowercase(), factory);
    }

    /// Makes `alias` resolve to `kind`.
    pub fn alias(&mut self, alias: &str, kind: &str) {
        self.aliases
            .insert(alias.to_ascii_lowercase(), kind.to_ascii_lowercase());
    }

    /// Returns the canonical identifier for `kind` or one of its aliases.
    #[must_use]
    pub fn resolve(&self, kind: &str) -> Option<&str> {
        self.lookup(kind).map(|(name, _)| name)
    }

    fn lookup(&self, kind: &str) -> Option<(&str, AdapterFactory)> {
        let kind = kind.trim().to_ascii_lowercase();
        let kind = self.aliases.get(&kind).unwrap_or(&kind);
        self.factories
            .get_key_value(kind)
            .map(|(name, factory)| (name.as_str(), *factory))
    }

    /// Registered identifiers, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Aliases as `(alias, identifier)` pairs, sorted by alias.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, k)| (a.as_str(), k.as_str()))
    }

    /// Creates the adapter for `repository`.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::UnknownBackend` if no backend is registered for
    /// `repository.scm`, or the factory's error.
    pub fn create(
        &self,
        repository: &RepositoryConfig,
        tools: &ToolsConfig,
        invoker: Arc<dyn CommandInvoker>,
    ) -> ScmResult<Box<dyn RepositoryAdapter>> {
        let (kind, factory) = self
            .lookup(&repository.scm)
            .ok_or_else(|| unknown_backend(&repository.scm))?;
        debug!(kind, url = %repository.url, "creating repository adapter");
        factory(repository, tools, invoker)
    }
}
