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

//! Dataverse schema model.
//!
//! Builds the model consumed by code generators out of the EDMX
//! document of a Dataverse environment and the entity metadata of its
//! Web API:
//!
//! 1. [`parser`] reads entity types, entity sets, complex types, enums,
//!    actions and functions from the EDMX document.
//! 2. [`filter`] keeps what the configured entities, actions and
//!    functions reach.
//! 3. [`enricher`] merges attribute metadata into the surviving
//!    entities and registers their option set enums.
//! 4. [`type_mapper`] attaches a semantic type to every property and
//!    parameter.
//!
//! [`SchemaModel`] drives the pipeline.

/// EDMX document structures.
pub mod edmx;
/// Schema graph.
pub mod model;
/// EDMX to schema graph conversion.
pub mod parser;
/// Option set interning.
pub mod context;
/// Semantic types of properties and parameters.
pub mod type_mapper;
/// Entity metadata enrichment.
pub mod enricher;
/// Reachability filter.
pub mod filter;
/// Generator options.
pub mod config;
/// Errors.
pub mod error;
/// Pipeline orchestrator.
pub mod schema_model;
/// File backed metadata service.
pub mod file_service;
/// Command line commands.
pub mod commands;

#[doc(inline)]
pub use config::DataverseGenOptions;
#[doc(inline)]
pub use context::SchemaBuildContext;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use error::ModelError;
#[doc(inline)]
pub use file_service::FileMetadataService;
#[doc(inline)]
pub use model::SchemaGraph;
#[doc(inline)]
pub use schema_model::SchemaModel;
