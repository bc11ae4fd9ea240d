// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository access.
//!
//! ```text
//! RepositoryConfig --AdapterRegistry::create--> Box<dyn RepositoryAdapter>
//!                        |                             |
//!                 "subversion" | "svn"         SubversionAdapter
//!                                                      |
//!                                    svn::args    target + argv per operation
//!                                    invoker      CommandInvoker (ProcessInvoker)
//!                                    svn::parse   XML --> model::{Entry, Revision}
//! ```
//!
//! Absence (`Ok(None)`) and errors (`Err`) are distinct: a missing path or a
//! failing tool run is absence, an unavailable tool is an error.

pub mod adapter;
pub mod invoker;
pub mod model;
pub mod registry;
pub mod svn;

#[cfg(test)]
mod tests;

pub use adapter::{ConnectionConfig, LogOptions, RepositoryAdapter};
pub use invoker::{CommandInvoker, ProcessInvoker, ToolCommand};
pub use model::{ChangeAction, Entries, Entry, EntryKind, PathChange, Revision};
pub use registry::AdapterRegistry;
