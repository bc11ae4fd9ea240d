// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository adapter contract and revision resolution.
//!
//! ```text
//! RepositoryAdapter (read-only)
//!   entry(path, rev)            rev <= 0 | None --> HEAD
//!   entries(path, rev)          rev <= 0 | None --> HEAD
//!   revisions(path, from, to)   from --> HEAD, to --> 1 (oldest), newest first
//!   diff(path, from, to)        to <= 0 | None --> from - 1, range "to:from"
//!   cat(path, rev)              rev <= 0 | None --> HEAD
//!
//! Ok(Some(_))  result
//! Ok(None)     absence (not found, tool exited non-zero, unparseable output)
//! Err(_)       tool unavailable, timeout, cancellation, output cap
//! ```

use std::fmt;

use crate::error::ScmResult;

use super::model::{Entries, Entry, Revision};

/// Oldest revision token of numbered backends.
pub const OLDEST_REVISION: u64 = 1;

/// A revision argument after default resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionSpec {
    /// The most recent revision.
    Head,
    Number(u64),
}

impl fmt::Display for RevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("HEAD"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Resolves a requested revision, defaulting to HEAD when absent or `<= 0`.
#[must_use]
pub fn resolve_revision(identifier: Option<i64>) -> RevisionSpec {
    positive(identifier).map_or(RevisionSpec::Head, RevisionSpec::Number)
}

/// Resolves the lower end of a history range, defaulting to the oldest
/// revision when absent or `<= 0`.
#[must_use]
pub fn resolve_oldest(identifier: Option<i64>) -> RevisionSpec {
    RevisionSpec::Number(positive(identifier).unwrap_or(OLDEST_REVISION))
}

/// Resolves the operands of a diff as `(first, second)`, in the order they
/// are passed to the tool: `identifier_to` first, `identifier_from` second.
///
/// `identifier_to` defaults to `identifier_from - 1` when absent or `<= 0`.
/// Returns `None` when `identifier_from <= 0`, since there is no preceding
/// revision to compare with.
#[must_use]
pub fn resolve_diff_range(identifier_from: i64, identifier_to: Option<i64>) -> Option<(u64, u64)> {
    let from = positive(Some(identifier_from))?;
    let to = positive(identifier_to).unwrap_or(from - 1);
    Some((to, from))
}

fn positive(identifier: Option<i64>) -> Option<u64> {
    identifier
        .filter(|id| *id > 0)
        .and_then(|id| u64::try_from(id).ok())
}

/// Options for history queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Include the changed paths of every revision (more expensive).
    pub with_paths: bool,
}

impl LogOptions {
    #[must_use]
    pub const fn with_paths() -> Self {
        Self { with_paths: true }
    }
}

/// Immutable connection settings for one repository.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    base_location: String,
    login: Option<String>,
    password: Option<String>,
}

impl ConnectionConfig {
    /// Creates connection settings.
    ///
    /// An empty login counts as no login. With a login, a missing password
    /// becomes the empty string; without one, the password is dropped.
    #[must_use]
    pub fn new(
        base_location: impl Into<String>,
        login: Option<String>,
        password: Option<String>,
    ) -> Self {
        let login = login.filter(|login| !login.is_empty());
        let password = login.as_ref().map(|_| password.unwrap_or_default());
        Self {
            base_location: base_location.into(),
            login,
            password,
        }
    }

    /// Repository root location.
    #[must_use]
    pub fn base_location(&self) -> &str {
        &self.base_location
    }

    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_location", &self.base_location)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "[hidden]"))
            .finish()
    }
}

/// Read-only access to one version-control repository.
///
/// Implementations hold only immutable configuration, so one instance can
/// serve concurrent calls from many threads. Every call is an independent
/// request against the backend.
pub trait RepositoryAdapter: Send + Sync {
    /// Backend identifier (e.g. "subversion").
    fn kind(&self) -> &'static str;

    /// Connection settings this adapter was created with.
    fn connection(&self) -> &ConnectionConfig;

    /// Returns the entry at `path` and revision, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend tool is unavailable or had to be
    /// killed (timeout, cancellation, output cap).
    fn entry(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Entry>>;

    /// Lists the children of `path`, sorted directories first then by name.
    ///
    /// An existing empty directory yields `Some` of an empty collection.
    ///
    /// # Errors
    ///
    /// See [`RepositoryAdapter::entry`].
    fn entries(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Entries>>;

    /// Returns the history of `path` from `identifier_from` down to
    /// `identifier_to`, inclusive, newest first.
    ///
    /// # Errors
    ///
    /// See [`RepositoryAdapter::entry`].
    fn revisions(
        &self,
        path: &str,
        identifier_from: Option<i64>,
        identifier_to: Option<i64>,
        options: LogOptions,
    ) -> ScmResult<Option<Vec<Revision>>>;

    /// Returns the unified diff of `path` between two revisions as raw lines,
    /// each ending with the terminator the tool wrote.
    ///
    /// # Errors
    ///
    /// See [`RepositoryAdapter::entry`].
    fn diff(
        &self,
        path: &str,
        identifier_from: i64,
        identifier_to: Option<i64>,
    ) -> ScmResult<Option<Vec<String>>>;

    /// Returns the raw content of the file at `path` and revision.
    ///
    /// # Errors
    ///
    /// See [`RepositoryAdapter::entry`].
    fn cat(&self, path: &str, identifier: Option<i64>) -> ScmResult<Option<Vec<u8>>>;
}
