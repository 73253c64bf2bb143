// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

/// Resource href (path or absolute URL).
///
/// A `Href` is what the server puts in `<D:href>`, such as
/// `/calendars/user/work/`. It is resolved against the configured URL
/// before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Href(String);

impl Href {
    /// Creates a new `Href` from a string.
    #[must_use]
    pub const fn new(href: String) -> Self {
        Self(href)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last non-empty path segment, e.g. `work` for `/calendars/user/work/`.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

impl Deref for Href {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Href {
    fn from(href: String) -> Self {
        Self(href)
    }
}

impl From<&str> for Href {
    fn from(href: &str) -> Self {
        Self(href.to_string())
    }
}

/// Entity tag returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ETag(String);

impl ETag {
    /// Creates a new `ETag` from a string.
    #[must_use]
    pub const fn new(etag: String) -> Self {
        Self(etag)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored object with its raw payload: iCalendar for calendar objects,
/// vCard for address objects.
///
/// Payloads are left unparsed so a single broken object can be skipped by
/// the caller without failing the whole response.
#[derive(Debug, Clone)]
pub struct DavObject {
    /// The href of the object.
    pub href: Href,
    /// The entity tag of the object, if reported.
    pub etag: Option<ETag>,
    /// The `calendar-data` or `address-data` text.
    pub data: String,
}

/// Calendar collection metadata.
#[derive(Debug, Clone)]
pub struct CalendarCollection {
    /// The href of the calendar collection.
    pub href: Href,
    /// The display name of the calendar.
    pub display_name: Option<String>,
    /// Supported component types (VEVENT, VTODO, etc.). Empty when the
    /// server does not report them, which means all are supported.
    pub supported_components: Vec<String>,
}

impl CalendarCollection {
    /// Creates a new `CalendarCollection`.
    #[must_use]
    pub fn new(href: Href) -> Self {
        Self {
            href,
            display_name: None,
            supported_components: Vec::new(),
        }
    }

    /// Whether the calendar can hold the given component type.
    #[must_use]
    pub fn supports(&self, component: &str) -> bool {
        self.supported_components.is_empty()
            || self
                .supported_components
                .iter()
                .any(|c| c.eq_ignore_ascii_case(component))
    }

    /// Whether `selector` names this calendar, by display name (ignoring
    /// case), full href or last href segment.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        self.display_name
            .as_deref()
            .is_some_and(|n| n.trim().eq_ignore_ascii_case(selector))
            || self.href.as_str() == selector
            || self.href.last_segment() == selector.trim_matches('/')
    }
}

/// Address book collection metadata.
#[derive(Debug, Clone)]
pub struct AddressBook {
    /// The href of the address book.
    pub href: Href,
    /// The display name of the address book.
    pub display_name: Option<String>,
}
