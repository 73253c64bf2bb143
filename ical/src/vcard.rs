// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::ParseError;
use crate::keyword::{KW_EMAIL, KW_FN, KW_N, KW_VCARD};
use crate::syntax::{Component, parse};
use crate::value::{cal_address, unescape_text};

/// Structured name from the `N` property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family name
    pub family: String,
    /// Given name
    pub given: String,
    /// Additional names
    pub additional: String,
}

impl StructuredName {
    fn parse(value: &str) -> Self {
        let mut parts = split_unescaped(value, ';').into_iter();
        let mut next = || parts.next().map(|s| unescape_text(&s)).unwrap_or_default();
        Self {
            family: next(),
            given: next(),
            additional: next(),
        }
    }
}

/// A contact card, reduced to naming and email data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    /// `FN`, unescaped.
    pub formatted_name: Option<String>,
    /// `N`, split into its components.
    pub name: Option<StructuredName>,
    /// Every `EMAIL` value, in order of appearance.
    pub emails: Vec<String>,
}

impl VCard {
    /// Builds a card from a parsed `VCARD` component.
    #[must_use]
    pub fn from_component(component: &Component) -> Self {
        Self {
            formatted_name: component
                .property(KW_FN)
                .map(|p| unescape_text(p.value.trim())),
            name: component
                .property(KW_N)
                .map(|p| StructuredName::parse(&p.value)),
            emails: component
                .properties_named(KW_EMAIL)
                .map(|p| cal_address(&p.value))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Name to show for this contact.
    ///
    /// Prefers `FN`; otherwise joins the family, given and additional names
    /// of `N`. Returns `None` when both are empty.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.formatted_name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            return Some(name.to_string());
        }

        let n = self.name.as_ref()?;
        let joined = [&n.family, &n.given, &n.additional]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Reads every card from a vCard document. Nested or unrelated components
/// are skipped.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed.
pub fn parse_vcards(src: &str) -> Result<Vec<VCard>, ParseError> {
    Ok(parse(src)?
        .iter()
        .filter(|c| c.name == KW_VCARD)
        .map(VCard::from_component)
        .collect())
}

fn split_unescaped(value: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}
