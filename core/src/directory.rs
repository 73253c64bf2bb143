// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use async_trait::async_trait;
use dayprint_caldav::{DavClient, DavConfig, DavError, Href};
use dayprint_ical::parse_vcards;
use tokio::sync::OnceCell;

use crate::Error;
use crate::exclusion::normalize_email;

/// Looks up display names by email address.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Returns the full name for `email`, or `None` when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryLookupFailed`] when the directory cannot
    /// be queried.
    async fn lookup(&self, email: &str) -> Result<Option<String>, Error>;
}

/// A directory that knows nobody, used when none is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDirectory;

#[async_trait]
impl Directory for NoDirectory {
    async fn lookup(&self, _email: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }
}

/// A `CardDAV` address book home, indexed by email on first use.
///
/// The index is fetched at most once per instance; a failed fetch is
/// remembered too, so every later lookup fails fast with the same reason.
#[derive(Debug)]
pub struct CardDavDirectory {
    client: DavClient,
    index: OnceCell<Result<HashMap<String, String>, String>>,
}

impl CardDavDirectory {
    /// Creates a directory for the address book home at `config.url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is invalid.
    pub fn new(config: DavConfig) -> Result<Self, Error> {
        let client = DavClient::new(config)
            .map_err(|e| Error::Config(format!("invalid directory settings: {e}")))?;
        Ok(Self {
            client,
            index: OnceCell::new(),
        })
    }

    async fn index(&self) -> &Result<HashMap<String, String>, String> {
        self.index
            .get_or_init(|| async {
                self.load().await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to load address book");
                    e.to_string()
                })
            })
            .await
    }

    /// Merges the contacts of every address book; later books win. A book
    /// that cannot be read is skipped, only failed discovery fails the load.
    async fn load(&self) -> Result<HashMap<String, String>, DavError> {
        let mut books: Vec<Href> = self
            .client
            .discover_address_books()
            .await?
            .into_iter()
            .map(|b| b.href)
            .collect();
        if books.is_empty() {
            let home = self.client.base_href();
            tracing::debug!(href = %home.as_str(), "no address books found, using it directly");
            books.push(home);
        }

        let mut index = HashMap::new();
        for book in books {
            match self.load_book(&book).await {
                Ok(contacts) => {
                    let count = contacts.len();
                    tracing::debug!(book = %book.as_str(), count, "loaded contacts");
                    index.extend(contacts);
                }
                Err(e) => {
                    tracing::warn!(book = %book.as_str(), error = %e, "skipping address book");
                }
            }
        }

        tracing::info!(count = index.len(), "loaded address books");
        Ok(index)
    }

    async fn load_book(&self, book: &Href) -> Result<Vec<(String, String)>, DavError> {
        let hrefs = self.client.list_vcards(book).await?;
        let objects = self.client.multiget_vcards(book, &hrefs).await?;

        let mut contacts = Vec::new();
        for object in objects {
            let cards = match parse_vcards(&object.data) {
                Ok(cards) => cards,
                Err(e) => {
                    let href = object.href.as_str();
                    tracing::warn!(%href, error = %e, "skipping unreadable contact");
                    continue;
                }
            };
            for card in cards {
                let Some(name) = card.display_name() else {
                    continue;
                };
                for email in card.emails.iter().filter_map(|e| normalize_email(e)) {
                    contacts.push((email, name.clone()));
                }
            }
        }
        Ok(contacts)
    }
}

#[async_trait]
impl Directory for CardDavDirectory {
    async fn lookup(&self, email: &str) -> Result<Option<String>, Error> {
        let Some(key) = normalize_email(email) else {
            return Ok(None);
        };
        match self.index().await {
            Ok(index) => Ok(index.get(&key).cloned()),
            Err(reason) => Err(Error::DirectoryLookupFailed {
                email: email.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}
