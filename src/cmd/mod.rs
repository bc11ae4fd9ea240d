// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis, backends), repo (entry, ls, log, diff, cat)
//! ```

pub mod config;
pub mod repo;

#[cfg(test)]
mod tests;
