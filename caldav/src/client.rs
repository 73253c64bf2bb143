// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only `CalDAV`/`CardDAV` client.

use reqwest::Url;

use crate::config::DavConfig;
use crate::error::DavError;
use crate::http::{Depth, HttpClient};
use crate::request::{
    AddressBookMultiGetRequest, CalendarQueryRequest, Prop, PropFindRequest, TimeRange,
};
use crate::response::MultiStatusResponse;
use crate::types::{AddressBook, CalendarCollection, DavObject, Href};

/// Client for reading calendars and address books from a `WebDAV` server.
///
/// # Example
///
/// ```ignore
/// use dayprint_caldav::{AuthMethod, DavClient, DavConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DavConfig::new(
///     "https://dav.example.com/",
///     AuthMethod::Basic {
///         username: "user".to_string(),
///         password: "pass".to_string(),
///     },
/// );
///
/// let client = DavClient::new(config)?;
/// let calendars = client.discover_calendars().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DavClient {
    http: HttpClient,
    base: Url,
}

impl DavClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or HTTP client initialization
    /// fails.
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        let base = Url::parse(config.url.trim())
            .map_err(|e| DavError::InvalidUrl(format!("{}: {e}", config.url)))?;
        let http = HttpClient::new(&config)?;
        Ok(Self { http, base })
    }

    /// The configured entry URL as an href.
    #[must_use]
    pub fn base_href(&self) -> Href {
        Href::new(self.base.to_string())
    }

    /// Resolves an href against the configured URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the href cannot be joined.
    pub fn url_for(&self, href: &Href) -> Result<Url, DavError> {
        self.base
            .join(href.as_str())
            .map_err(|e| DavError::InvalidUrl(format!("{href}: {e}")))
    }

    /// Finds the principal of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn current_user_principal(&self) -> Result<Option<Href>, DavError> {
        let request = PropFindRequest::new().prop(Prop::CurrentUserPrincipal);
        let multistatus = self
            .propfind(&self.base_href(), Depth::Zero, &request)
            .await?;
        Ok(multistatus.current_user_principal())
    }

    /// Finds the calendar home of a principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn calendar_home_set(&self, principal: &Href) -> Result<Option<Href>, DavError> {
        let request = PropFindRequest::new().prop(Prop::CalendarHomeSet);
        let multistatus = self.propfind(principal, Depth::Zero, &request).await?;
        Ok(multistatus.calendar_home_set())
    }

    /// Finds the address book home of a principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn address_book_home_set(
        &self,
        principal: &Href,
    ) -> Result<Option<Href>, DavError> {
        let request = PropFindRequest::new().prop(Prop::AddressBookHomeSet);
        let multistatus = self.propfind(principal, Depth::Zero, &request).await?;
        Ok(multistatus.address_book_home_set())
    }

    /// Lists calendar collections in `home` (and `home` itself if it is one).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_calendars(&self, home: &Href) -> Result<Vec<CalendarCollection>, DavError> {
        let request = PropFindRequest::new()
            .prop(Prop::DisplayName)
            .prop(Prop::ResourceType)
            .prop(Prop::SupportedCalendarComponents);
        let multistatus = self.propfind(home, Depth::One, &request).await?;
        Ok(multistatus.into_calendars())
    }

    /// Discovers the calendars of the authenticated user.
    ///
    /// Follows `current-user-principal` and `calendar-home-set`; a step the
    /// server does not answer falls back to the configured URL.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    pub async fn discover_calendars(&self) -> Result<Vec<CalendarCollection>, DavError> {
        let base = self.base_href();
        let principal = self.current_user_principal().await?;
        tracing::debug!(?principal, "current user principal");

        let principal = principal.unwrap_or_else(|| base.clone());
        let home = self.calendar_home_set(&principal).await?;
        tracing::debug!(?home, "calendar home set");

        let home = home.unwrap_or(principal);
        let calendars = self.list_calendars(&home).await?;
        if calendars.is_empty() && self.url_for(&home)? != self.base {
            return self.list_calendars(&base).await;
        }
        Ok(calendars)
    }

    /// Fetches the event objects of a calendar overlapping `time_range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn query_events(
        &self,
        calendar: &Href,
        time_range: TimeRange,
    ) -> Result<Vec<DavObject>, DavError> {
        let body = CalendarQueryRequest::events(time_range).build()?;
        let multistatus = self.report(calendar, body).await?;
        Ok(multistatus.into_calendar_objects())
    }

    /// Lists address books in `home` (and `home` itself if it is one).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_address_books(&self, home: &Href) -> Result<Vec<AddressBook>, DavError> {
        let request = PropFindRequest::new()
            .prop(Prop::ResourceType)
            .prop(Prop::DisplayName);
        let multistatus = self.propfind(home, Depth::One, &request).await?;
        Ok(multistatus.into_address_books())
    }

    /// Discovers the address books of the authenticated user.
    ///
    /// Follows `current-user-principal` and `addressbook-home-set` like
    /// [`Self::discover_calendars`]; a step the server does not answer falls
    /// back to the configured URL.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    pub async fn discover_address_books(&self) -> Result<Vec<AddressBook>, DavError> {
        let base = self.base_href();
        let principal = self.current_user_principal().await?;
        tracing::debug!(?principal, "current user principal");

        let principal = principal.unwrap_or_else(|| base.clone());
        let home = self.address_book_home_set(&principal).await?;
        tracing::debug!(?home, "address book home set");

        let home = home.unwrap_or(principal);
        let books = self.list_address_books(&home).await?;
        if books.is_empty() && self.url_for(&home)? != self.base {
            return self.list_address_books(&base).await;
        }
        Ok(books)
    }

    /// Lists the vCard hrefs of an address book.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_vcards(&self, book: &Href) -> Result<Vec<Href>, DavError> {
        let request = PropFindRequest::new()
            .prop(Prop::GetETag)
            .prop(Prop::GetContentType);
        let multistatus = self.propfind(book, Depth::One, &request).await?;
        Ok(multistatus.vcard_hrefs())
    }

    /// Fetches vCards by href with a single `addressbook-multiget`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn multiget_vcards(
        &self,
        book: &Href,
        hrefs: &[Href],
    ) -> Result<Vec<DavObject>, DavError> {
        if hrefs.is_empty() {
            return Ok(Vec::new());
        }

        let body = AddressBookMultiGetRequest::new(hrefs.iter().cloned()).build()?;
        let multistatus = self.report(book, body).await?;
        Ok(multistatus.into_address_objects())
    }

    async fn propfind(
        &self,
        href: &Href,
        depth: Depth,
        request: &PropFindRequest,
    ) -> Result<MultiStatusResponse, DavError> {
        let url = self.url_for(href)?;
        tracing::debug!(%url, ?depth, "PROPFIND");
        let req = self
            .http
            .build_xml_request("PROPFIND", url, depth, request.build()?)?;
        let xml = self.http.execute(req).await?.text().await?;
        MultiStatusResponse::from_xml(&xml)
    }

    async fn report(&self, href: &Href, body: String) -> Result<MultiStatusResponse, DavError> {
        let url = self.url_for(href)?;
        tracing::debug!(%url, "REPORT");
        let req = self
            .http
            .build_xml_request("REPORT", url, Depth::One, body)?;
        let xml = self.http.execute(req).await?.text().await?;
        MultiStatusResponse::from_xml(&xml)
    }
}
