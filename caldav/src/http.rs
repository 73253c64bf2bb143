// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and `WebDAV` methods.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::config::{AuthMethod, DavConfig};
use crate::error::DavError;

/// Value of the `Depth` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// The resource itself.
    Zero,
    /// The resource and its direct members.
    One,
}

impl Depth {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
        }
    }
}

/// HTTP client for `WebDAV` operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    auth: AuthMethod,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &DavConfig) -> Result<Self, DavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            auth: config.auth.clone(),
        })
    }

    /// Builds a `PROPFIND` or `REPORT` request with an XML body.
    ///
    /// # Errors
    ///
    /// Returns an error if the method name is invalid.
    pub fn build_xml_request(
        &self,
        method: &'static str,
        url: Url,
        depth: Depth,
        body: String,
    ) -> Result<RequestBuilder, DavError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| DavError::Http(format!("Invalid method: {e}")))?;
        Ok(self
            .build_request(method, url)
            .header("Content-Type", "application/xml; charset=utf-8")
            .header("Depth", depth.as_str())
            .body(body))
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, DavError> {
        let resp = req.send().await?;

        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DavError::Auth(format!(
                "{} for {}",
                resp.status(),
                resp.url()
            ))),
            status => {
                tracing::debug!(%status, url = %resp.url(), "request rejected");
                Err(DavError::Status {
                    code: status.as_u16(),
                    url: resp.url().to_string(),
                })
            }
        }
    }
}
