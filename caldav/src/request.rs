// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request builders for `WebDAV` operations.

use std::io::Cursor;

use jiff::Timestamp;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::DavError;
use crate::types::Href;
use crate::xml::{into_string, ns};

/// PROPFIND request builder.
#[derive(Debug, Default)]
pub struct PropFindRequest {
    props: Vec<Prop>,
}

/// Properties to request in PROPFIND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    /// Display name.
    DisplayName,
    /// Resource type.
    ResourceType,
    /// `ETag`.
    GetETag,
    /// MIME type of the resource.
    GetContentType,
    /// Principal of the authenticated user.
    CurrentUserPrincipal,
    /// Calendar home set.
    CalendarHomeSet,
    /// Supported calendar components.
    SupportedCalendarComponents,
    /// Address book home set.
    AddressBookHomeSet,
}

impl Prop {
    const fn name(self) -> &'static str {
        match self {
            Self::DisplayName => "displayname",
            Self::ResourceType => "resourcetype",
            Self::GetETag => "getetag",
            Self::GetContentType => "getcontenttype",
            Self::CurrentUserPrincipal => "current-user-principal",
            Self::CalendarHomeSet => "calendar-home-set",
            Self::SupportedCalendarComponents => "supported-calendar-component-set",
            Self::AddressBookHomeSet => "addressbook-home-set",
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::DisplayName
            | Self::ResourceType
            | Self::GetETag
            | Self::GetContentType
            | Self::CurrentUserPrincipal => "D",
            Self::CalendarHomeSet | Self::SupportedCalendarComponents => "C",
            Self::AddressBookHomeSet => "A",
        }
    }
}

impl PropFindRequest {
    /// Creates a new PROPFIND request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property to the request.
    #[must_use]
    pub fn prop(mut self, prop: Prop) -> Self {
        self.props.push(prop);
        self
    }

    /// Builds the XML body for the PROPFIND request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, DavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <D:propfind xmlns:D="DAV:" ...>
        let mut propfind = BytesStart::new("D:propfind");
        propfind.push_attribute(("xmlns:D", ns::DAV));
        if self.props.iter().any(|p| p.prefix() == "C") {
            propfind.push_attribute(("xmlns:C", ns::CALDAV));
        }
        if self.props.iter().any(|p| p.prefix() == "A") {
            propfind.push_attribute(("xmlns:A", ns::CARDDAV));
        }
        writer.write_event(Event::Start(propfind))?;
        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;

        for prop in &self.props {
            let tag = format!("{}:{}", prop.prefix(), prop.name());
            writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        }

        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        writer.write_event(Event::End(BytesEnd::new("D:propfind")))?;

        into_string(writer)
    }
}

/// Time range filter, `[start, end)` in absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive start.
    pub start: Timestamp,
    /// Exclusive end.
    pub end: Timestamp,
}

impl TimeRange {
    /// Formats a timestamp as a UTC `DATE-TIME`, e.g. `20250101T210000Z`.
    #[must_use]
    pub fn format(ts: Timestamp) -> String {
        ts.strftime("%Y%m%dT%H%M%SZ").to_string()
    }
}

/// `calendar-query` REPORT for events overlapping a time range.
#[derive(Debug)]
pub struct CalendarQueryRequest {
    time_range: TimeRange,
}

impl CalendarQueryRequest {
    /// Creates a query for `VEVENT`s overlapping `time_range`.
    #[must_use]
    pub const fn events(time_range: TimeRange) -> Self {
        Self { time_range }
    }

    /// Builds the XML body for the calendar query request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, DavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <C:calendar-query xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
        let mut calendar_query = BytesStart::new("C:calendar-query");
        calendar_query.push_attribute(("xmlns:D", ns::DAV));
        calendar_query.push_attribute(("xmlns:C", ns::CALDAV));
        writer.write_event(Event::Start(calendar_query))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        writer.write_event(Event::Empty(BytesStart::new("D:getetag")))?;
        writer.write_event(Event::Empty(BytesStart::new("C:calendar-data")))?;
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        writer.write_event(Event::Start(BytesStart::new("C:filter")))?;

        let mut calendar_filter = BytesStart::new("C:comp-filter");
        calendar_filter.push_attribute(("name", "VCALENDAR"));
        writer.write_event(Event::Start(calendar_filter))?;

        let mut event_filter = BytesStart::new("C:comp-filter");
        event_filter.push_attribute(("name", "VEVENT"));
        writer.write_event(Event::Start(event_filter))?;

        let start = TimeRange::format(self.time_range.start);
        let end = TimeRange::format(self.time_range.end);
        let mut time_range = BytesStart::new("C:time-range");
        time_range.push_attribute(("start", start.as_str()));
        time_range.push_attribute(("end", end.as_str()));
        writer.write_event(Event::Empty(time_range))?;

        writer.write_event(Event::End(BytesEnd::new("C:comp-filter")))?;
        writer.write_event(Event::End(BytesEnd::new("C:comp-filter")))?;
        writer.write_event(Event::End(BytesEnd::new("C:filter")))?;
        writer.write_event(Event::End(BytesEnd::new("C:calendar-query")))?;

        into_string(writer)
    }
}

/// `addressbook-multiget` REPORT builder.
#[derive(Debug, Default)]
pub struct AddressBookMultiGetRequest {
    hrefs: Vec<Href>,
}

impl AddressBookMultiGetRequest {
    /// Creates a multiget request for the given vCard hrefs.
    #[must_use]
    pub fn new(hrefs: impl IntoIterator<Item = Href>) -> Self {
        Self {
            hrefs: hrefs.into_iter().collect(),
        }
    }

    /// Builds the XML body for the multiget request.
    ///
    /// # Errors
    ///
    /// Returns an error if XML building fails.
    pub fn build(&self) -> Result<String, DavError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <A:addressbook-multiget xmlns:D="DAV:" xmlns:A="urn:ietf:params:xml:ns:carddav">
        let mut multiget = BytesStart::new("A:addressbook-multiget");
        multiget.push_attribute(("xmlns:D", ns::DAV));
        multiget.push_attribute(("xmlns:A", ns::CARDDAV));
        writer.write_event(Event::Start(multiget))?;

        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        writer.write_event(Event::Empty(BytesStart::new("D:getetag")))?;
        writer.write_event(Event::Empty(BytesStart::new("A:address-data")))?;
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;

        for href in &self.hrefs {
            writer.write_event(Event::Start(BytesStart::new("D:href")))?;
            writer.write_event(Event::Text(BytesText::new(href.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("D:href")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("A:addressbook-multiget")))?;

        into_string(writer)
    }
}
