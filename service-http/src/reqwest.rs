// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::CacheableError;
use crate::HttpClient;
use dataverse_gen_core::AccessToken;
use http::header;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub enum ServiceError {
    ReqwestError(reqwest::Error),
    JsonError(serde_path_to_error::Error<serde_json::Error>),
    InvalidResponse(Box<reqwest::Response>),
    CacheError(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value)
    }
}

impl CacheableError for ServiceError {
    fn cache_error(reason: String) -> Self {
        Self::CacheError(reason)
    }
}

#[allow(clippy::absolute_paths)]
impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReqwestError(e) => write!(f, "HTTP client error: {e:?}"),
            Self::InvalidResponse(response) => {
                write!(
                    f,
                    "Invalid HTTP response: {} from {}",
                    response.status(),
                    response.url()
                )
            }
            Self::CacheError(r) => write!(f, "Error occurred in cache {r:?}"),
            Self::JsonError(e) => write!(
                f,
                "JSON deserialization error at line {} column {} path {}: {e}",
                e.inner().line(),
                e.inner().column(),
                e.path(),
            ),
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReqwestError(e) => Some(e),
            Self::JsonError(e) => Some(e.inner()),
            _ => None,
        }
    }
}

/// Configuration parameters for the reqwest HTTP client.
///
/// # Examples
///
/// ```rust
/// use dataverse_gen_service_http::reqwest::ClientParams;
/// use std::time::Duration;
///
/// let params = ClientParams::new()
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(10))
///     .user_agent("MyApp/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// HTTP request timeout
    pub timeout: Option<Duration>,
    /// TCP connection timeout
    pub connect_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Maximum number of HTTP redirects to follow
    pub max_redirects: Option<usize>,
    /// List of default headers, added to every request
    pub default_headers: Option<HeaderMap>,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            // $metadata of a large environment takes a while
            timeout: Some(Duration::from_secs(300)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: Some("dataverse-gen/v1".to_string()),
            accept_invalid_certs: false,
            max_redirects: Some(10),
            default_headers: None,
        }
    }
}

impl ClientParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub const fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    #[must_use]
    pub fn default_headers(mut self, default_headers: HeaderMap) -> Self {
        self.default_headers = Some(default_headers);
        self
    }
}

/// HTTP client implementation using the reqwest library.
///
/// # Examples
///
/// ```rust,no_run
/// use dataverse_gen_core::AccessToken;
/// use dataverse_gen_service_http::reqwest::Client;
/// use dataverse_gen_service_http::reqwest::ClientParams;
/// use dataverse_gen_service_http::CacheSettings;
/// use dataverse_gen_service_http::HttpMetadataService;
/// use std::time::Duration;
/// use url::Url;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = ClientParams::new().timeout(Duration::from_secs(60));
/// let client = Client::with_params(params)?;
/// let server = Url::parse("https://org.crm.dynamics.com")?;
/// let token = AccessToken::new("token".to_string());
/// let service = HttpMetadataService::new(client, server, token, CacheSettings::default());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

#[allow(clippy::missing_errors_doc)]
#[allow(clippy::absolute_paths)]
impl Client {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_params(ClientParams::default())
    }

    pub fn with_params(params: ClientParams) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = params.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(user_agent) = params.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if params.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(max_redirects) = params.max_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(max_redirects));
        }

        if let Some(default_headers) = params.default_headers {
            builder = builder.default_headers(default_headers);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Client {
    async fn send(
        &self,
        url: Url,
        accept: &'static str,
        token: &AccessToken,
        custom_headers: &HeaderMap,
    ) -> Result<reqwest::Response, ServiceError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .header(header::ACCEPT, accept)
            .header("OData-MaxVersion", "4.0")
            .header("OData-Version", "4.0")
            .headers(custom_headers.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::InvalidResponse(Box::new(response)));
        }
        Ok(response)
    }
}

impl HttpClient for Client {
    type Error = ServiceError;

    async fn get_text(
        &self,
        url: Url,
        token: &AccessToken,
        custom_headers: &HeaderMap,
    ) -> Result<String, Self::Error> {
        let response = self
            .send(url, "application/xml", token, custom_headers)
            .await?;
        Ok(response.text().await?)
    }

    async fn get_json<T>(
        &self,
        url: Url,
        token: &AccessToken,
        custom_headers: &HeaderMap,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let response = self
            .send(url, "application/json", token, custom_headers)
            .await?;
        let value: serde_json::Value = response.json().await?;
        serde_path_to_error::deserialize(value).map_err(ServiceError::JsonError)
    }
}
