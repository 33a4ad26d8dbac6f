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

use crate::edmx::Annotation;
use crate::edmx::TypeName;
use serde::Deserialize;

/// Element edm:EntityContainer
#[derive(Debug, Deserialize)]
pub struct DeEntityContainer {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeEntityContainerItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeEntityContainerItem {
    EntitySet(EntitySet),
    Singleton(Singleton),
    ActionImport(OperationImport),
    FunctionImport(OperationImport),
    Annotation(Annotation),
}

/// Element edm:EntitySet
#[derive(Debug, Deserialize)]
pub struct EntitySet {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@EntityType")]
    pub entity_type: String,
}

/// Element edm:Singleton
#[derive(Debug, Deserialize)]
pub struct Singleton {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Type")]
    pub stype: String,
}

/// Element edm:ActionImport or edm:FunctionImport
#[derive(Debug, Deserialize)]
pub struct OperationImport {
    #[serde(rename = "@Name")]
    pub name: String,
}

/// Validated edm:EntityContainer. Only entity sets are used by the
/// schema model.
#[derive(Debug)]
pub struct EntityContainer {
    pub name: TypeName,
    pub entity_sets: Vec<EntitySet>,
}

impl DeEntityContainer {
    #[must_use]
    pub fn validate(self) -> EntityContainer {
        EntityContainer {
            name: self.name,
            entity_sets: self
                .items
                .into_iter()
                .filter_map(|v| match v {
                    DeEntityContainerItem::EntitySet(v) => Some(v),
                    _ => None,
                })
                .collect(),
        }
    }
}
