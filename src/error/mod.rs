// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          ScmError (~24 bytes)
//!                 |
//!     +-----------+-----------+
//!     |           |           |
//!     v           v           v
//!  Process     Config      UnknownBackend
//!    Box         Box         Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Process  ExecutableNotFound, SpawnFailed, Timeout,
//!            Cancelled, OutputLimitExceeded, OutputError
//!   Config   MissingKey, InvalidValue
//!
//! ParseError (Xml, MissingField, InvalidValue) stands alone: the parsers
//! return it, adapters log it and report absence.
//! ```
//!
//! Absence (path not present, tool exited non-zero, unreadable output) is
//! not an error: adapter operations return `Ok(None)` for it.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ScmError`].
pub type ScmResult<T> = std::result::Result<T, ScmError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ScmError {
    /// External tool could not be run to completion.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// No adapter is registered for the backend identifier.
    #[error("unknown repository backend: {0}")]
    UnknownBackend(Box<str>),
}

impl ScmError {
    /// Returns true if the external executable could not be located or started.
    ///
    /// This is the "repository unreachable" condition: a deployment problem,
    /// never a data problem.
    #[must_use]
    pub fn is_command_unavailable(&self) -> bool {
        matches!(self, Self::Process(e) if matches!(**e, ProcessError::ExecutableNotFound { .. }))
    }
}

/// Create an [`ScmError::UnknownBackend`] for the given identifier.
pub fn unknown_backend(kind: impl Into<String>) -> ScmError {
    ScmError::UnknownBackend(kind.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ScmError {
                fn from(err: $error) -> Self {
                    ScmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProcessError => Process,
    ConfigError => Config,
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH or not startable.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process did not finish before its deadline and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Process was killed because cancellation was requested.
    #[error("process '{command}' was cancelled")]
    Cancelled { command: String },

    /// Process produced more output than allowed and was killed.
    #[error("process '{command}' exceeded the output limit of {limit} bytes")]
    OutputLimitExceeded { command: String, limit: usize },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Parse Errors ---

/// Errors raised while turning tool output into domain records.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Output is not a well-formed document of the expected shape.
    #[error("malformed {document} output: {message}")]
    Xml {
        document: &'static str,
        message: String,
    },

    /// A required element or attribute is missing.
    #[error("{document} output is missing '{field}'")]
    MissingField {
        document: &'static str,
        field: &'static str,
    },

    /// A field has a value that cannot be interpreted.
    #[error("invalid value for '{field}': '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
