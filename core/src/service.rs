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

//! Contract between the schema model and the remote Dataverse service.
//!
//! The schema model never talks to the network directly. Everything it
//! needs from the server goes through the [`MetadataService`] trait:
//!
//! - [`MetadataService::get_edmx_metadata`] returns the full EDMX
//!   (`$metadata`) document as text.
//! - [`MetadataService::get_entity_metadata`] returns the attribute
//!   metadata for one entity. An empty `EntityMetadata` list means the
//!   entity does not exist on the server.
//!
//! Notes for implementors:
//! - Futures must be `Send` so that the pipeline can be driven from
//!   multithreaded runtimes.
//! - Retries, authentication and caching belong to the implementation.
//!   Errors are passed through to the caller unchanged.
//!
//! ```rust
//! use dataverse_gen_core::metadata::RetrieveMetadataChangesResponse;
//! use dataverse_gen_core::EntityLogicalName;
//! use dataverse_gen_core::MetadataService;
//! use std::io::Error;
//!
//! struct Offline(String);
//!
//! impl MetadataService for Offline {
//!     type Error = Error;
//!
//!     async fn get_edmx_metadata(&self, _use_cache: bool) -> Result<String, Error> {
//!         Ok(self.0.clone())
//!     }
//!
//!     async fn get_entity_metadata(
//!         &self,
//!         _logical_name: &EntityLogicalName,
//!     ) -> Result<RetrieveMetadataChangesResponse, Error> {
//!         Ok(RetrieveMetadataChangesResponse::default())
//!     }
//! }
//!
//! let service = Offline("<edmx:Edmx/>".into());
//! let edmx = tokio_test::block_on(service.get_edmx_metadata(true)).unwrap();
//! assert_eq!(edmx, "<edmx:Edmx/>");
//! let account = tokio_test::block_on(service.get_entity_metadata(&"account".into())).unwrap();
//! assert!(account.entity_metadata.is_empty());
//! ```

use crate::metadata::RetrieveMetadataChangesResponse;
use crate::EntityLogicalName;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

/// Access to the EDMX document and per-entity metadata of a Dataverse
/// environment.
pub trait MetadataService: Send + Sync {
    /// Service error.
    type Error: StdError + Send + Sync;

    /// Fetch the EDMX document.
    ///
    /// When `use_cache` is set the implementation may return a
    /// previously stored copy instead of asking the server.
    fn get_edmx_metadata(
        &self,
        use_cache: bool,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Fetch attribute metadata of the entity with `logical_name`.
    fn get_entity_metadata(
        &self,
        logical_name: &EntityLogicalName,
    ) -> impl Future<Output = Result<RetrieveMetadataChangesResponse, Self::Error>> + Send;
}

/// Bearer token used to access the Web API.
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token.
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self(token)
    }

    /// Raw token value.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken([REDACTED])")
    }
}
