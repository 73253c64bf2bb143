// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only client for calendars (`CalDAV`, RFC 4791) and address books
//! (`CardDAV`, RFC 6352).

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod client;
mod config;
mod error;
mod http;
mod request;
mod response;
mod types;
mod xml;

pub use crate::client::DavClient;
pub use crate::config::{AuthMethod, DavConfig};
pub use crate::error::DavError;
pub use crate::http::Depth;
pub use crate::request::{
    AddressBookMultiGetRequest, CalendarQueryRequest, Prop, PropFindRequest, TimeRange,
};
pub use crate::response::{MultiStatusResponse, PropStat, Properties, ResponseItem};
pub use crate::types::{AddressBook, CalendarCollection, DavObject, ETag, Href};
