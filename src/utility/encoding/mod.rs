// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of tool output that carries repository file content.
//!
//! ```text
//! diff output bytes --(TextEncoding::decode_lines)--> Vec<String> (UTF-8)
//! ```
//!
//! Uses `encoding_rs` with WHATWG labels ("utf-8", "windows-1252",
//! "iso-8859-1", "shift_jis", ...). Invalid sequences → U+FFFD.

use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

use crate::error::ConfigError;

/// Text encoding used to decode repository content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl Default for TextEncoding {
    fn default() -> Self {
        Self(UTF_8)
    }
}

impl TextEncoding {
    /// Looks up an encoding by WHATWG label.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if the label is unknown.
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| ConfigError::InvalidValue {
                section: "tools".to_string(),
                key: "encoding".to_string(),
                message: format!("unknown encoding label '{label}'"),
            })
    }

    /// Canonical name of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decodes bytes to UTF-8. A BOM, if present, overrides the encoding.
    ///
    /// # Example
    /// ```
    /// use scm_adapter::utility::encoding::TextEncoding;
    ///
    /// let cp1252 = TextEncoding::from_label("windows-1252").unwrap();
    /// assert_eq!(cp1252.decode(b"caf\xe9"), "café");
    /// ```
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        let (text, _encoding, _had_errors) = self.0.decode(bytes);
        text
    }

    /// Decodes bytes and splits them into lines after each `\n`.
    ///
    /// Terminators (`\n` or `\r\n`) stay on their lines, so joining the
    /// result reproduces the decoded text. A last line without a terminator
    /// is kept as is.
    #[must_use]
    pub fn decode_lines(self, bytes: &[u8]) -> Vec<String> {
        self.decode(bytes)
            .split_inclusive('\n')
            .map(str::to_string)
            .collect()
    }
}
