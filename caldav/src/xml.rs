// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for WebDAV/CalDAV/CardDAV processing.

use std::io::Cursor;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::DavError;

/// XML namespaces used in `WebDAV` extensions.
pub mod ns {
    /// `WebDAV` namespace.
    pub const DAV: &str = "DAV:";

    /// `CalDAV` namespace.
    pub const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";

    /// `CardDAV` namespace.
    pub const CARDDAV: &str = "urn:ietf:params:xml:ns:carddav";
}

/// Reads the text content of the element just opened by `start`, up to its
/// matching end tag.
///
/// Entity and character references are resolved and `CDATA` sections are
/// taken verbatim, so calendar data keeps its line breaks either way.
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn read_text(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<String, DavError> {
    let mut out = String::new();
    let mut depth = 0_usize;
    loop {
        match reader.read_event()? {
            Event::Text(e) => out.push_str(utf8(&e)?),
            Event::CData(e) => out.push_str(utf8(&e)?),
            Event::GeneralRef(e) => out.push_str(&resolve_reference(utf8(&e)?)?),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                if depth == 0 && e.name() == start.name() {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
    Ok(out.trim().to_string())
}

/// Reads the first `href` nested in the element opened by `start`, e.g.
/// inside `current-user-principal`. Consumes the whole element.
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn read_nested_href(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Option<String>, DavError> {
    let mut href = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().local_name().into_inner() == b"href" => {
                let text = read_text(reader, &e)?;
                if href.is_none() && !text.is_empty() {
                    href = Some(text);
                }
            }
            Event::End(e) if e.name() == start.name() => return Ok(href),
            Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

/// Collects the local names of the child elements of the element opened by
/// `start`, e.g. `collection` and `calendar` inside `resourcetype`.
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn read_child_names(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Vec<String>, DavError> {
    let mut names = Vec::new();
    let mut depth = 0_usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    names.push(local_name(&e)?);
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 0 => names.push(local_name(&e)?),
            Event::End(e) => {
                if depth == 0 && e.name() == start.name() {
                    return Ok(names);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

/// Returns the value of an attribute, if present.
///
/// # Errors
///
/// Returns an error if the attribute is malformed or not UTF-8.
pub fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, DavError> {
    let Some(attr) = e
        .try_get_attribute(name)
        .map_err(|e| DavError::Xml(format!("Attribute error: {e}")))?
    else {
        return Ok(None);
    };
    let value = std::str::from_utf8(&attr.value)
        .map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))?;
    Ok(Some(value.to_string()))
}

/// Finishes a request body written with [`Writer`].
///
/// # Errors
///
/// Returns an error if the output is not UTF-8.
pub fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String, DavError> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
}

fn local_name(e: &BytesStart<'_>) -> Result<String, DavError> {
    utf8(e.name().local_name().into_inner()).map(ToString::to_string)
}

fn utf8(bytes: &[u8]) -> Result<&str, DavError> {
    std::str::from_utf8(bytes).map_err(|e| DavError::Xml(format!("UTF-8 error: {e}")))
}

fn resolve_reference(name: &str) -> Result<String, DavError> {
    let resolved = match name.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse().ok(),
        }
        .and_then(char::from_u32)
        .map(String::from),
        None => quick_xml::escape::resolve_predefined_entity(name).map(ToString::to_string),
    };
    resolved.ok_or_else(|| DavError::Xml(format!("Unknown entity: &{name};")))
}
