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

//! Shared types of the dataverse-gen workspace.
//!
//! - [`MetadataService`]: access to the EDMX document and per-entity
//!   metadata of a Dataverse environment.
//! - [`metadata`]: serde model of the metadata API response.
//! - [`EntityLogicalName`]: join key between EDMX and metadata API.

pub mod metadata;
pub mod name;
pub mod service;

#[doc(inline)]
pub use name::EntityLogicalName;
#[doc(inline)]
pub use service::AccessToken;
#[doc(inline)]
pub use service::MetadataService;
