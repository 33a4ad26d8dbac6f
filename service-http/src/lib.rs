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

//! Dataverse Web API implementation of [`MetadataService`].
//!
//! [`HttpMetadataService`] combines an [`HttpClient`] with the
//! environment URL and an access token. EDMX and entity metadata
//! responses are kept in memory for the lifetime of the service. The
//! EDMX document can additionally be stored in a file so that repeated
//! runs do not download it again (see [`CacheSettings`]).

#[cfg(feature = "reqwest")]
pub mod reqwest;

use dataverse_gen_core::metadata::RetrieveMetadataChangesResponse;
use dataverse_gen_core::AccessToken;
use dataverse_gen_core::EntityLogicalName;
use dataverse_gen_core::MetadataService;
use http::HeaderMap;
use log::debug;
use log::info;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::RwLock;
use url::Url;

/// Web API version used for all requests.
pub const WEB_API_PATH: &str = "/api/data/v9.0";

/// Entity properties requested from `RetrieveMetadataChanges`.
pub const ENTITY_PROPERTIES: [&str; 3] = ["Attributes", "SchemaName", "EntitySetName"];

/// Attribute properties requested from `RetrieveMetadataChanges`.
pub const ATTRIBUTE_PROPERTIES: [&str; 14] = [
    "SchemaName",
    "LogicalName",
    "OptionSet",
    "RequiredLevel",
    "AttributeType",
    "AttributeTypeName",
    "SourceType",
    "IsLogical",
    "AttributeOf",
    "Targets",
    "Description",
    "DateTimeBehavior",
    "Format",
    "DisplayName",
];

pub trait HttpClient: Send + Sync {
    type Error: Send + Sync + StdError;

    /// Perform an HTTP GET request and return the body as text.
    fn get_text(
        &self,
        url: Url,
        token: &AccessToken,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Perform an HTTP GET request and deserialize the JSON body.
    fn get_json<T>(
        &self,
        url: Url,
        token: &AccessToken,
        custom_headers: &HeaderMap,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send
    where
        T: DeserializeOwned + Send + Sync;
}

/// Errors that can report failures of the local EDMX cache.
pub trait CacheableError {
    /// Create error for failed cache read or write.
    fn cache_error(reason: String) -> Self;
}

/// Web API endpoint of a Dataverse environment.
#[derive(Debug, Clone)]
pub struct WebApiEndpoint {
    base_url: Url,
}

impl WebApiEndpoint {
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Url of the `$metadata` document.
    #[must_use]
    pub fn metadata(&self) -> Url {
        self.with_path("$metadata")
    }

    /// Url of `RetrieveMetadataChanges` restricted to one entity.
    #[must_use]
    pub fn retrieve_metadata_changes(&self, logical_name: &EntityLogicalName) -> Url {
        let query = json!({
            "Criteria": {
                "FilterOperator": "And",
                "Conditions": [{
                    "PropertyName": "LogicalName",
                    "ConditionOperator": "Equals",
                    "Value": { "Value": logical_name.as_str(), "Type": "System.String" },
                }],
            },
            "Properties": {
                "AllProperties": false,
                "PropertyNames": ENTITY_PROPERTIES,
            },
            "AttributeQuery": {
                "Properties": {
                    "AllProperties": false,
                    "PropertyNames": ATTRIBUTE_PROPERTIES,
                },
            },
        });
        let mut url = self.with_path("RetrieveMetadataChanges(Query=@q)");
        url.query_pairs_mut().append_pair("@q", &query.to_string());
        url
    }

    fn with_path(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}{WEB_API_PATH}/{path}"));
        url.set_query(None);
        url
    }
}

impl From<Url> for WebApiEndpoint {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

/// Settings of the on-disk EDMX cache.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    edmx_file: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            edmx_file: Some(PathBuf::from("cds-edmx.xml")),
        }
    }
}

impl CacheSettings {
    /// Store EDMX document in `path`.
    pub fn with_edmx_file(path: impl Into<PathBuf>) -> Self {
        Self {
            edmx_file: Some(path.into()),
        }
    }

    /// Keep cache in memory only.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self { edmx_file: None }
    }
}

/// HTTP based metadata service.
pub struct HttpMetadataService<C: HttpClient> {
    client: C,
    endpoint: WebApiEndpoint,
    token: AccessToken,
    cache_settings: CacheSettings,
    edmx: RwLock<Option<String>>,
    entities: RwLock<HashMap<EntityLogicalName, RetrieveMetadataChangesResponse>>,
    custom_headers: HeaderMap,
}

impl<C: HttpClient> HttpMetadataService<C>
where
    C::Error: CacheableError,
{
    /// Create a new service for the environment at `server`.
    pub fn new(client: C, server: Url, token: AccessToken, cache_settings: CacheSettings) -> Self {
        Self::with_custom_headers(client, server, token, cache_settings, HeaderMap::new())
    }

    /// Create a new service that sends `custom_headers` with every request.
    pub fn with_custom_headers(
        client: C,
        server: Url,
        token: AccessToken,
        cache_settings: CacheSettings,
        custom_headers: HeaderMap,
    ) -> Self {
        Self {
            client,
            endpoint: WebApiEndpoint::from(server),
            token,
            cache_settings,
            edmx: RwLock::new(None),
            entities: RwLock::new(HashMap::new()),
            custom_headers,
        }
    }

    fn cached_edmx(&self) -> Result<Option<String>, C::Error> {
        let in_memory = self
            .edmx
            .read()
            .map_err(|e| C::Error::cache_error(e.to_string()))?
            .clone();
        if in_memory.is_some() {
            return Ok(in_memory);
        }
        match &self.cache_settings.edmx_file {
            Some(path) if path.exists() => {
                debug!("reading cached EDMX from {}", path.display());
                fs::read_to_string(path)
                    .map(Some)
                    .map_err(|e| C::Error::cache_error(format!("{}: {e}", path.display())))
            }
            _ => Ok(None),
        }
    }

    fn store_edmx(&self, document: &str, use_cache: bool) -> Result<(), C::Error> {
        *self
            .edmx
            .write()
            .map_err(|e| C::Error::cache_error(e.to_string()))? = Some(document.to_string());
        if use_cache {
            if let Some(path) = &self.cache_settings.edmx_file {
                fs::write(path, document)
                    .map_err(|e| C::Error::cache_error(format!("{}: {e}", path.display())))?;
            }
        }
        Ok(())
    }
}

impl<C: HttpClient> MetadataService for HttpMetadataService<C>
where
    C::Error: CacheableError,
{
    type Error = C::Error;

    async fn get_edmx_metadata(&self, use_cache: bool) -> Result<String, Self::Error> {
        if use_cache {
            if let Some(document) = self.cached_edmx()? {
                return Ok(document);
            }
        }
        info!("Fetching EDMX metadata");
        let document = self
            .client
            .get_text(self.endpoint.metadata(), &self.token, &self.custom_headers)
            .await?;
        self.store_edmx(&document, use_cache)?;
        Ok(document)
    }

    async fn get_entity_metadata(
        &self,
        logical_name: &EntityLogicalName,
    ) -> Result<RetrieveMetadataChangesResponse, Self::Error> {
        let cached = self
            .entities
            .read()
            .map_err(|e| C::Error::cache_error(e.to_string()))?
            .get(logical_name)
            .cloned();
        if let Some(response) = cached {
            return Ok(response);
        }

        info!("Fetching Dataverse metadata for {logical_name}");
        let mut response: RetrieveMetadataChangesResponse = self
            .client
            .get_json(
                self.endpoint.retrieve_metadata_changes(logical_name),
                &self.token,
                &self.custom_headers,
            )
            .await?;
        for entity in &mut response.entity_metadata {
            entity
                .attributes
                .sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
        }
        self.entities
            .write()
            .map_err(|e| C::Error::cache_error(e.to_string()))?
            .insert(logical_name.clone(), response.clone());
        Ok(response)
    }
}
