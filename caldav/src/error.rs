// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// `CalDAV`/`CardDAV` client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum DavError {
    /// HTTP layer error, including timeouts and refused connections.
    Http(String),

    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        code: u16,
        /// Requested URL.
        url: String,
    },

    /// Authentication error.
    Auth(String),

    /// XML parsing/writing error.
    Xml(String),

    /// A configured or returned URL cannot be used.
    InvalidUrl(String),
}

impl fmt::Display for DavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { code, url } => write!(f, "Server returned status {code} for {url}"),
            Self::Auth(e) => write!(f, "Authentication failed: {e}"),
            Self::Xml(e) => write!(f, "XML error: {e}"),
            Self::InvalidUrl(e) => write!(f, "Invalid URL: {e}"),
        }
    }
}

impl std::error::Error for DavError {}

impl From<reqwest::Error> for DavError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<quick_xml::Error> for DavError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::io::Error> for DavError {
    fn from(e: std::io::Error) -> Self {
        Self::Xml(format!("IO error: {e}"))
    }
}
