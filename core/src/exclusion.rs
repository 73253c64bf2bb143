// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use dayprint_ical::value::cal_address;
use tokio::fs;

use crate::Error;

/// Addresses of non-human attendees, such as meeting rooms, that never
/// appear on the schedule. Matching ignores case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    /// Builds a set from addresses, with or without `mailto:`.
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            emails
                .into_iter()
                .filter_map(|e| normalize_email(e.as_ref()))
                .collect(),
        )
    }

    /// Parses a list with one address per line. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    /// Loads the list from `path`. A missing file is an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read.
    #[tracing::instrument]
    pub async fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let set = Self::parse(&content);
                tracing::info!(count = set.len(), "loaded meeting room addresses");
                Ok(set)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("meeting room list not found, no rooms are filtered");
                Ok(Self::default())
            }
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Whether `email` is in the set, ignoring case and `mailto:`.
    pub fn contains(&self, email: &str) -> bool {
        normalize_email(email).is_some_and(|e| self.0.contains(&e))
    }

    /// Number of addresses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lower-cases an address and strips `mailto:`. `None` when empty.
pub(crate) fn normalize_email(email: &str) -> Option<String> {
    let email = cal_address(email).to_lowercase();
    (!email.is_empty()).then_some(email)
}
