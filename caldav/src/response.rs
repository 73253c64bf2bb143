// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for WebDAV/CalDAV/CardDAV operations.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::DavError;
use crate::types::{AddressBook, CalendarCollection, DavObject, ETag, Href};
use crate::xml::{attribute, read_child_names, read_nested_href, read_text};

/// `WebDAV` multistatus response.
#[derive(Debug, Clone, Default)]
pub struct MultiStatusResponse {
    /// The response items.
    pub responses: Vec<ResponseItem>,
}

/// Individual response in multistatus.
#[derive(Debug, Clone, Default)]
pub struct ResponseItem {
    /// The resource this item describes.
    pub href: Href,
    /// Property groups by status.
    pub prop_stats: Vec<PropStat>,
    /// Response-level status, used instead of propstat by some servers.
    pub status: Option<String>,
}

/// Property stat with status and value.
#[derive(Debug, Clone, Default)]
pub struct PropStat {
    /// Properties reported under this status.
    pub props: Properties,
    /// Status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
}

impl PropStat {
    /// Whether the status line reports success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        is_success(&self.status)
    }
}

/// WebDAV/CalDAV/CardDAV properties.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    /// `D:displayname`
    pub display_name: Option<String>,
    /// Local names of the `D:resourcetype` children.
    pub resource_types: Vec<String>,
    /// `D:getetag`
    pub etag: Option<ETag>,
    /// `D:getcontenttype`
    pub content_type: Option<String>,
    /// `D:current-user-principal`
    pub current_user_principal: Option<Href>,
    /// `C:calendar-home-set`
    pub calendar_home_set: Option<Href>,
    /// `A:addressbook-home-set`
    pub address_book_home_set: Option<Href>,
    /// `C:supported-calendar-component-set`
    pub supported_calendar_components: Vec<String>,
    /// `C:calendar-data`
    pub calendar_data: Option<String>,
    /// `A:address-data`
    pub address_data: Option<String>,
}

impl Properties {
    fn has_type(&self, name: &str) -> bool {
        self.resource_types.iter().any(|t| t == name)
    }
}

impl ResponseItem {
    /// Properties reported with a success status.
    pub fn ok_props(&self) -> impl Iterator<Item = &Properties> {
        let response_ok = self.status.as_deref().is_none_or(is_success);
        self.prop_stats
            .iter()
            .filter(move |p| p.is_ok() || (p.status.is_empty() && response_ok))
            .map(|p| &p.props)
    }
}

impl MultiStatusResponse {
    /// Parses multistatus response from XML.
    ///
    /// # Errors
    ///
    /// Returns an error if XML parsing fails.
    pub fn from_xml(xml: &str) -> Result<Self, DavError> {
        // Text is not trimmed: calendar data split by character references
        // would lose its line breaks.
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut responses = Vec::new();
        let mut current: Option<ResponseItem> = None;
        let mut propstat: Option<PropStat> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match name.local_name().into_inner() {
                        b"response" => current = Some(ResponseItem::default()),
                        b"propstat" if current.is_some() => propstat = Some(PropStat::default()),

                        b"href" if propstat.is_none() => {
                            let href = read_text(&mut reader, &e)?;
                            if let Some(resp) = current.as_mut() {
                                resp.href = Href::new(href);
                            }
                        }
                        b"status" => {
                            let status = read_text(&mut reader, &e)?;
                            match (propstat.as_mut(), current.as_mut()) {
                                (Some(stat), _) => stat.status = status,
                                (None, Some(resp)) => resp.status = Some(status),
                                (None, None) => {}
                            }
                        }

                        local => {
                            if let Some(stat) = propstat.as_mut() {
                                read_property(&mut reader, &e, local, &mut stat.props)?;
                            }
                        }
                    }
                }
                Event::End(e) => match e.name().local_name().into_inner() {
                    b"propstat" => {
                        if let (Some(stat), Some(resp)) = (propstat.take(), current.as_mut()) {
                            resp.prop_stats.push(stat);
                        }
                    }
                    b"response" => {
                        if let Some(resp) = current.take() {
                            responses.push(resp);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { responses })
    }

    /// The first reported `current-user-principal`.
    #[must_use]
    pub fn current_user_principal(&self) -> Option<Href> {
        self.find_prop(|p| p.current_user_principal.clone())
    }

    /// The first reported `calendar-home-set`.
    #[must_use]
    pub fn calendar_home_set(&self) -> Option<Href> {
        self.find_prop(|p| p.calendar_home_set.clone())
    }

    /// The first reported `addressbook-home-set`.
    #[must_use]
    pub fn address_book_home_set(&self) -> Option<Href> {
        self.find_prop(|p| p.address_book_home_set.clone())
    }

    /// Converts the response to calendar collections, skipping anything
    /// that is not a calendar.
    #[must_use]
    pub fn into_calendars(self) -> Vec<CalendarCollection> {
        let mut calendars = Vec::new();
        for response in self.responses {
            for props in response.ok_props() {
                if props.has_type("calendar") {
                    let mut calendar = CalendarCollection::new(response.href.clone());
                    calendar.display_name.clone_from(&props.display_name);
                    calendar
                        .supported_components
                        .clone_from(&props.supported_calendar_components);
                    calendars.push(calendar);
                }
            }
        }
        calendars
    }

    /// Converts the response to address books, skipping anything that is not
    /// an address book.
    #[must_use]
    pub fn into_address_books(self) -> Vec<AddressBook> {
        let mut books = Vec::new();
        for response in self.responses {
            for props in response.ok_props() {
                if props.has_type("addressbook") {
                    books.push(AddressBook {
                        href: response.href.clone(),
                        display_name: props.display_name.clone(),
                    });
                }
            }
        }
        books
    }

    /// Hrefs of members whose content type is a vCard.
    #[must_use]
    pub fn vcard_hrefs(&self) -> Vec<Href> {
        self.responses
            .iter()
            .filter(|r| {
                r.ok_props().any(|p| {
                    p.content_type
                        .as_deref()
                        .is_some_and(|t| t.to_ascii_lowercase().contains("vcard"))
                })
            })
            .map(|r| r.href.clone())
            .collect()
    }

    /// Objects carrying `calendar-data`.
    #[must_use]
    pub fn into_calendar_objects(self) -> Vec<DavObject> {
        self.into_objects(|p| p.calendar_data.as_ref())
    }

    /// Objects carrying `address-data`.
    #[must_use]
    pub fn into_address_objects(self) -> Vec<DavObject> {
        self.into_objects(|p| p.address_data.as_ref())
    }

    fn into_objects(self, data: impl Fn(&Properties) -> Option<&String>) -> Vec<DavObject> {
        let mut objects = Vec::new();
        for response in self.responses {
            for props in response.ok_props() {
                if let Some(data) = data(props).filter(|d| !d.is_empty()) {
                    objects.push(DavObject {
                        href: response.href.clone(),
                        etag: props.etag.clone(),
                        data: data.clone(),
                    });
                }
            }
        }
        objects
    }

    fn find_prop(&self, f: impl Fn(&Properties) -> Option<Href>) -> Option<Href> {
        self.responses
            .iter()
            .flat_map(ResponseItem::ok_props)
            .find_map(f)
    }
}

fn read_property(
    reader: &mut Reader<&[u8]>,
    e: &quick_xml::events::BytesStart<'_>,
    local: &[u8],
    props: &mut Properties,
) -> Result<(), DavError> {
    match local {
        b"displayname" => props.display_name = Some(read_text(reader, e)?),
        b"getetag" => props.etag = Some(ETag::new(read_text(reader, e)?)),
        b"getcontenttype" => props.content_type = Some(read_text(reader, e)?),
        b"calendar-data" => props.calendar_data = Some(read_text(reader, e)?),
        b"address-data" => props.address_data = Some(read_text(reader, e)?),
        b"resourcetype" => props.resource_types = read_child_names(reader, e)?,
        b"current-user-principal" => {
            props.current_user_principal = read_nested_href(reader, e)?.map(Href::new);
        }
        b"calendar-home-set" => {
            props.calendar_home_set = read_nested_href(reader, e)?.map(Href::new);
        }
        b"addressbook-home-set" => {
            props.address_book_home_set = read_nested_href(reader, e)?.map(Href::new);
        }
        b"supported-calendar-component-set" => {
            let mut components = Vec::new();
            loop {
                match reader.read_event()? {
                    Event::Start(comp) | Event::Empty(comp)
                        if comp.name().local_name().into_inner() == b"comp" =>
                    {
                        if let Some(name) = attribute(&comp, "name")? {
                            components.push(name);
                        }
                    }
                    Event::End(end) if end.name() == e.name() => break,
                    Event::Eof => return Err(DavError::Xml("Unexpected EOF".to_string())),
                    _ => {}
                }
            }
            props.supported_calendar_components = components;
        }
        _ => {}
    }
    Ok(())
}

fn is_success(status: &str) -> bool {
    status
        .split_whitespace()
        .nth(1)
        .is_some_and(|code| code.starts_with('2'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert!(is_success("HTTP/1.1 200 OK"));
        assert!(is_success("HTTP/1.1 207 Multi-Status"));
        assert!(!is_success("HTTP/1.1 404 Not Found"));
        assert!(!is_success(""));
    }
}
