// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Domain records built from tool output.
//!
//! ```text
//! Entries ── Vec<Entry>
//!              Entry { name, path, kind, size, last_revision }
//!                                                   |
//!                                                   v
//!              Revision { identifier, author, time, message, paths }
//!                                                            |
//!                                                            v
//!                                  Option<Vec<PathChange { action, path, copy_from }>>
//! ```
//!
//! Records are constructed fresh on every call and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Kind of a repository node.
///
/// Variant order is the grouping order used by [`Entries::sort_by_name`]:
/// directories before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(rename = "dir")]
    Directory,
    File,
}

impl EntryKind {
    /// Returns the tag the tool uses for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "dir",
            Self::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dir" => Ok(Self::Directory),
            "file" => Ok(Self::File),
            other => Err(ParseError::InvalidValue {
                field: "kind",
                value: other.to_string(),
            }),
        }
    }
}

/// One file or directory node at a given revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    /// Full path relative to the repository root location.
    pub path: String,
    pub kind: EntryKind,
    /// Size in bytes; always 0 for directories.
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_revision: Option<Revision>,
}

impl Entry {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Ordered collection of [`Entry`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entries(Vec<Entry>);

impl Entries {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    /// Finds an entry by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.0.iter().find(|entry| entry.name == name)
    }

    /// Sorts by `(kind, name)`: all directories, then all files, each group
    /// in ascending lexical name order.
    #[must_use]
    pub fn sort_by_name(mut self) -> Self {
        self.0
            .sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        self
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Entry> {
        self.0
    }
}

impl From<Vec<Entry>> for Entries {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Entry> for Entries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Entries {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One committed changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub identifier: u64,
    /// Empty when the commit has no author (e.g. anonymous commits).
    pub author: String,
    pub time: DateTime<Utc>,
    /// Empty when the commit has no message.
    pub message: String,
    /// Changed paths; `None` unless verbose history was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathChange>>,
}

/// What happened to a path within a revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Added,
    Modified,
    Deleted,
    Replaced,
    /// Backend-specific code with no dedicated variant.
    Other(String),
}

impl ChangeAction {
    /// Returns the short code the tool uses.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Added => "A",
            Self::Modified => "M",
            Self::Deleted => "D",
            Self::Replaced => "R",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for ChangeAction {
    fn from(code: &str) -> Self {
        match code {
            "A" => Self::Added,
            "M" => Self::Modified,
            "D" => Self::Deleted,
            "R" => Self::Replaced,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for ChangeAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

/// A single path's change within one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathChange {
    pub action: ChangeAction,
    pub path: String,
    /// Source of a copy, as `(path, revision)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_from: Option<(String, u64)>,
}
