// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Authentication method for `CalDAV` and `CardDAV` requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Server connection settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DavConfig {
    /// Entry URL: a server root, a principal, a calendar home or a
    /// collection. Relative hrefs returned by the server are resolved
    /// against it.
    pub url: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("dayprint/", env!("CARGO_PKG_VERSION")).to_string()
}

impl DavConfig {
    /// Creates a configuration with default timeout and user agent.
    #[must_use]
    pub fn new(url: impl Into<String>, auth: AuthMethod) -> Self {
        Self {
            url: url.into(),
            auth,
            ..Default::default()
        }
    }
}

impl Default for DavConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
