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

//! Scenario test support: mocked metadata service, fixtures and
//! option builders.

pub mod error;

#[doc(inline)]
pub use error::Error;

use dataverse_gen_schema_model::DataverseGenOptions;
use dataverse_gen_schema_model::SchemaModel;
use dataverse_gen_service_mock::Expect as MockExpect;
use dataverse_gen_service_mock::MetadataService as MockService;
use error::TestError;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

pub type Service = MockService<TestError>;
pub type Expect = MockExpect<TestError>;
pub type Model = SchemaModel<Service>;

/// EDMX document used by most scenarios.
pub const DATAVERSE_EDMX: &str = "edmx/dataverse.xml";

/// EDMX document where every list has exactly one element.
pub const SINGLE_EDMX: &str = "edmx/single.xml";

/// Directory with EDMX and metadata fixtures.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Content of `fixtures/<name>`.
///
/// # Errors
///
/// `Error::Fixture` if the file cannot be read.
pub fn fixture(name: &str) -> Result<String, Error> {
    let path = fixtures_dir().join(name);
    read_to_string(&path).map_err(|err| Error::Fixture(path, err))
}

/// Metadata API response for `logical_name`.
///
/// # Errors
///
/// `Error::Fixture` if the file cannot be read.
pub fn entity_fixture(logical_name: &str) -> Result<String, Error> {
    fixture(&format!("metadata/{logical_name}.json"))
}

/// Options with the given allow-lists and default everything else.
#[must_use]
pub fn options(entities: &[&str], actions: &[&str], functions: &[&str]) -> DataverseGenOptions {
    let list = |items: &[&str]| items.iter().map(ToString::to_string).collect();
    DataverseGenOptions {
        entities: list(entities),
        actions: list(actions),
        functions: list(functions),
        ..DataverseGenOptions::default()
    }
}

/// Service answering the EDMX request with the `edmx` fixture and
/// then the entity requests of `metadata`, in that order, from the
/// metadata fixtures.
///
/// # Errors
///
/// `Error::Fixture` if a fixture cannot be read.
pub fn service(edmx: &str, metadata: &[&str]) -> Result<Service, Error> {
    let service = Service::new();
    service.expect(Expect::edmx(fixture(edmx)?));
    for name in metadata {
        service.expect(Expect::entity(name, entity_fixture(name)?));
    }
    Ok(service)
}

/// Build the model of `edmx` with `options`. Entity metadata requests
/// are answered for `metadata` (surviving entities in name order).
///
/// # Errors
///
/// Fixture or schema model errors.
pub async fn generate(
    edmx: &str,
    options: DataverseGenOptions,
    metadata: &[&str],
) -> Result<Model, Error> {
    let mut model = SchemaModel::new(service(edmx, metadata)?, options);
    model.generate().await?;
    Ok(model)
}

/// Names of `items` in order.
pub fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
    items.iter().map(name).collect()
}
