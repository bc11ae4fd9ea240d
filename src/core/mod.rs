// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for running external tools.
//!
//! ```text
//!        core
//!         |
//!         v
//!      process
//!         |
//!   Builder  Output
//!   which cache, deadline, cap, cancel
//! ```

pub mod process;
