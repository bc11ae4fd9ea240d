// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronous process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("svn")
//!   .args() .secret_arg() .env()
//!   .timeout() .output_limit() .cancel_token()
//!   .run()
//!       --> std::process::Command (argv, no shell)
//!           reader threads for stdout/stderr
//!           kill on deadline / cancel / cap
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
