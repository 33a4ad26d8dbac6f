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

use crate::edmx::complex_type::ComplexType;
use crate::edmx::complex_type::DeComplexType;
use crate::edmx::entity_container::DeEntityContainer;
use crate::edmx::entity_container::EntityContainer;
use crate::edmx::entity_type::DeEntityType;
use crate::edmx::entity_type::EntityType;
use crate::edmx::enum_type::DeEnumType;
use crate::edmx::enum_type::EnumType;
use crate::edmx::operation::DeOperation;
use crate::edmx::operation::Operation;
use crate::edmx::Annotations;
use crate::edmx::SchemaNamespace;
use crate::edmx::Term;
use crate::edmx::TypeDefinition;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:Schema
#[derive(Debug, Deserialize)]
pub struct DeSchema {
    #[serde(rename = "@Namespace")]
    pub namespace: SchemaNamespace,
    #[serde(rename = "@Alias")]
    pub alias: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeSchemaItem>,
}

/// Items of edm:Schema
#[derive(Debug, Deserialize)]
pub enum DeSchemaItem {
    EntityType(DeEntityType),
    ComplexType(DeComplexType),
    EnumType(DeEnumType),
    Action(DeOperation),
    Function(DeOperation),
    EntityContainer(DeEntityContainer),
    TypeDefinition(TypeDefinition),
    Term(Term),
    Annotations(Annotations),
}

/// Validated edm:Schema.
#[derive(Debug, Default)]
pub struct Schema {
    pub namespace: SchemaNamespace,
    pub alias: Option<String>,
    pub entity_types: Vec<EntityType>,
    pub complex_types: Vec<ComplexType>,
    pub enum_types: Vec<EnumType>,
    pub actions: Vec<Operation>,
    pub functions: Vec<Operation>,
    pub type_definitions: Vec<TypeDefinition>,
    /// Dataverse always publishes the container, but a document
    /// without one is still a valid schema.
    pub entity_container: Option<EntityContainer>,
}

impl DeSchema {
    /// # Errors
    ///
    /// - `ValidateError::Schema` wrapping the validation error of an
    ///   item or `ValidateError::TooManyEntityContainers`.
    pub fn validate(self) -> Result<Schema, ValidateError> {
        let namespace = self.namespace;
        let init = Schema {
            namespace: namespace.clone(),
            alias: self.alias,
            ..Schema::default()
        };
        self.items
            .into_iter()
            .try_fold(init, |mut s, v| {
                match v {
                    DeSchemaItem::EntityType(v) => s.entity_types.push(v.validate()?),
                    DeSchemaItem::ComplexType(v) => s.complex_types.push(v.validate()?),
                    DeSchemaItem::EnumType(v) => s.enum_types.push(v.validate()?),
                    DeSchemaItem::Action(v) => s.actions.push(v.validate()?),
                    DeSchemaItem::Function(v) => s.functions.push(v.validate()?),
                    DeSchemaItem::TypeDefinition(v) => s.type_definitions.push(v),
                    DeSchemaItem::EntityContainer(v) => {
                        if s.entity_container.is_some() {
                            return Err(ValidateError::TooManyEntityContainers);
                        }
                        s.entity_container = Some(v.validate());
                    }
                    DeSchemaItem::Term(_) | DeSchemaItem::Annotations(_) => (),
                }
                Ok(s)
            })
            .map_err(|e| ValidateError::Schema(namespace, Box::new(e)))
    }
}
