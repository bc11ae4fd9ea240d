// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for `svn --xml` output.
//!
//! ```text
//! info  <info><entry kind path><commit revision><author/><date/></commit></entry></info>
//! list  <lists><list path><entry kind><name/><size/><commit .../></entry></list></lists>
//! log   <log><logentry revision><author/><date/><paths><path action>P</path></paths><msg/></logentry></log>
//! ```

use std::borrow::Cow;
use std::fmt::Display;

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;
use crate::scm::model::{ChangeAction, Entries, Entry, EntryKind, PathChange, Revision};

const INFO: &str = "info";
const LIST: &str = "list";
const LOG: &str = "log";

/// One element of a parsed document.
///
/// `text` holds the element's own character data exactly as emitted, so
/// names, paths and messages keep leading and trailing whitespace.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Self>,
    text: String,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, document: &'static str, name: &'static str) -> Result<&str, ParseError> {
        self.attribute(name)
            .ok_or(ParseError::MissingField { document, field: name })
    }

    fn children<'a, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a Self> + use<'a, 'b> {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children(name).next()
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }
}

/// Parses `svn info --xml` output into the entry for `path`.
///
/// Returns `Ok(None)` when the document holds no entry.
///
/// # Errors
///
/// Returns `ParseError` if the document is malformed or a value cannot be
/// interpreted.
pub fn parse_info(xml: &[u8], path: &str) -> Result<Option<Entry>, ParseError> {
    let document = read_document(INFO, "info", xml)?;
    document
        .children("entry")
        .last()
        .map(|entry| {
            Ok(Entry {
                name: entry.required(INFO, "path")?.to_string(),
                path: path.to_string(),
                kind: entry.required(INFO, "kind")?.parse()?,
                size: 0,
                last_revision: commit_revision(INFO, entry)?,
            })
        })
        .transpose()
}

/// Parses `svn list --xml` output into the sorted children of `path`.
///
/// # Errors
///
/// Returns `ParseError` if the document is malformed or a value cannot be
/// interpreted.
pub fn parse_list(xml: &[u8], path: &str) -> Result<Entries, ParseError> {
    let document = read_document(LIST, "lists", xml)?;
    let entries = document
        .children("list")
        .flat_map(|list| list.children("entry"))
        .map(|entry| list_entry(entry, path))
        .collect::<Result<Entries, _>>()?;
    Ok(entries.sort_by_name())
}

fn list_entry(entry: &Element, parent: &str) -> Result<Entry, ParseError> {
    let kind: EntryKind = entry.required(LIST, "kind")?.parse()?;
    let name = entry
        .child_text("name")
        .ok_or(ParseError::MissingField {
            document: LIST,
            field: "name",
        })?
        .to_string();
    let size = entry
        .child_text("size")
        .map(|size| parse_number("size", size))
        .transpose()?
        .unwrap_or(0);
    let path = if parent.is_empty() {
        name.clone()
    } else {
        format!("{parent}/{name}")
    };
    Ok(Entry {
        name,
        path,
        kind,
        size,
        last_revision: commit_revision(LIST, entry)?,
    })
}

/// Parses `svn log --xml` output, newest first as emitted by the tool.
///
/// Changed paths are kept only when `with_paths` is set.
///
/// # Errors
///
/// Returns `ParseError` if the document is malformed or a value cannot be
/// interpreted.
pub fn parse_log(xml: &[u8], with_paths: bool) -> Result<Vec<Revision>, ParseError> {
    let document = read_document(LOG, "log", xml)?;
    document
        .children("logentry")
        .map(|entry| log_entry(entry, with_paths))
        .collect()
}

fn log_entry(entry: &Element, with_paths: bool) -> Result<Revision, ParseError> {
    let paths = if with_paths {
        Some(
            entry
                .child("paths")
                .into_iter()
                .flat_map(|paths| paths.children("path"))
                .map(path_change)
                .collect::<Result<Vec<_>, _>>()?,
        )
    } else {
        None
    };

    Ok(Revision {
        identifier: parse_number("revision", entry.required(LOG, "revision")?)?,
        author: entry.child_text("author").unwrap_or_default().to_string(),
        time: parse_date(LOG, entry.child_text("date"))?,
        message: entry.child_text("msg").unwrap_or_default().to_string(),
        paths,
    })
}

fn path_change(element: &Element) -> Result<PathChange, ParseError> {
    let copy_from = match (element.attribute("copyfrom-path"), element.attribute("copyfrom-rev")) {
        (Some(path), Some(rev)) => Some((path.to_string(), parse_number("copyfrom-rev", rev)?)),
        _ => None,
    };
    Ok(PathChange {
        action: ChangeAction::from(element.required(LOG, "action")?),
        path: element.text.clone(),
        copy_from,
    })
}

/// The last revision recorded in the nested `<commit>` element, if any.
fn commit_revision(document: &'static str, entry: &Element) -> Result<Option<Revision>, ParseError> {
    entry
        .child("commit")
        .map(|commit| {
            Ok(Revision {
                identifier: parse_number("revision", commit.required(document, "revision")?)?,
                author: commit.child_text("author").unwrap_or_default().to_string(),
                time: parse_date(document, commit.child_text("date"))?,
                message: String::new(),
                paths: None,
            })
        })
        .transpose()
}

/// Reads a whole document and returns its root element, which must be
/// named `root`.
fn read_document(document: &'static str, root: &str, xml: &[u8]) -> Result<Element, ParseError> {
    let malformed = |message: &dyn Display| ParseError::Xml {
        document,
        message: message.to_string(),
    };
    let text = std::str::from_utf8(xml).map_err(|e| malformed(&e))?;

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    // Bottom of the stack collects top-level elements.
    let mut open = vec![Element::default()];
    loop {
        match reader.read_event().map_err(|e| malformed(&e))? {
            Event::Start(start) => open.push(element(&start).map_err(|e| malformed(&e))?),
            Event::Empty(start) => {
                let empty = element(&start).map_err(|e| malformed(&e))?;
                if let Some(parent) = open.last_mut() {
                    parent.children.push(empty);
                }
            }
            Event::End(_) => {
                let closed = open.pop().filter(|_| !open.is_empty());
                match (closed, open.last_mut()) {
                    (Some(closed), Some(parent)) => parent.children.push(closed),
                    _ => return Err(malformed(&"unbalanced end tag")),
                }
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(|e| malformed(&e))?;
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&content);
                }
            }
            Event::CData(content) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open.len() != 1 {
        return Err(malformed(&"unexpected end of document"));
    }
    open.pop()
        .and_then(|top| top.children.into_iter().next())
        .filter(|top| top.name == root)
        .ok_or_else(|| malformed(&format_args!("expected a <{root}> root element")))
}

fn element(start: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let value: Cow<'_, str> = attribute.unescape_value()?;
        attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        ..Element::default()
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_date(document: &'static str, value: Option<&str>) -> Result<DateTime<Utc>, ParseError> {
    let value = value.ok_or(ParseError::MissingField {
        document,
        field: "date",
    })?;
    DateTime::parse_from_rfc3339(value.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| ParseError::InvalidValue {
            field: "date",
            value: value.to_string(),
        })
}
