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

//! In-memory schema graph.
//!
//! The graph is built from the EDMX document, pruned by the reference
//! filter, enriched with metadata API data and finally annotated with
//! type descriptors. Nodes refer to each other by name only; the
//! `referenced_by` lists hold names of actions, functions, entities or
//! complex types that use the node.
//!
//! All structures serialize to PascalCase JSON so that a renderer can
//! consume the final graph.

pub mod type_descriptor;

#[doc(inline)]
pub use type_descriptor::OutputType;
#[doc(inline)]
pub use type_descriptor::StructuralType;
#[doc(inline)]
pub use type_descriptor::TypeDescriptor;

use serde::Serialize;

/// Entity type (table).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityType {
    /// Logical name. Join key with the metadata API.
    pub name: String,
    /// Set during enrichment.
    pub schema_name: Option<String>,
    pub entity_set_name: Option<String>,
    pub base_type: Option<String>,
    #[serde(rename = "Abstract")]
    pub is_abstract: bool,
    pub key_name: Option<String>,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
    pub referenced_by: Vec<String>,
}

/// Structural property of an entity, complex type or operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    pub name: String,
    pub schema_name: Option<String>,
    /// Raw type: EDMX type reference or attribute type name. Enum
    /// typed attributes carry the enum name.
    #[serde(rename = "Type")]
    pub ptype: String,
    pub nullable: Option<bool>,
    pub is_required: bool,
    pub is_enum: bool,
    pub is_multi_select: bool,
    /// `<format>:<behavior>` for date attributes, empty otherwise.
    pub format: String,
    pub display_name: String,
    pub description: String,
    pub attribute_of: Option<String>,
    pub source_type: Option<i32>,
    pub type_descriptor: Option<TypeDescriptor>,
}

impl Property {
    /// Property as declared in EDMX.
    #[must_use]
    pub fn declared(name: impl Into<String>, ptype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ptype: ptype.into(),
            ..Self::default()
        }
    }
}

/// Navigation property.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationProperty {
    /// Last dot separated segment of `full_name`.
    pub name: String,
    pub full_name: String,
    /// Target type without `Collection(...)`. Collapsed lookups carry
    /// comma separated target entity names.
    #[serde(rename = "Type")]
    pub ptype: String,
    /// Last segment of the target type.
    pub logical_name: String,
    pub is_collection: bool,
    pub referenced_property: Option<String>,
    pub referential_constraint: Option<String>,
    pub type_descriptor: Option<TypeDescriptor>,
}

/// Complex type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComplexType {
    pub name: String,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
    /// Actions and functions that use the type directly.
    pub referenced_by: Vec<String>,
    /// Complex types that reach this type through their properties.
    pub referenced_by_root: Vec<String>,
}

/// Enumeration: EDMX enum type or option set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumType {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub referenced_by: Vec<String>,
    pub referenced_by_root: Vec<String>,
}

impl EnumType {
    /// Sort members by numeric value. Members with a value that is
    /// not an integer go last, keeping their order.
    pub fn sort_members(&mut self) {
        self.members
            .sort_by_key(|m| m.numeric_value().map_or((1, 0), |v| (0, v)));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumMember {
    pub name: String,
    pub value: String,
}

impl EnumMember {
    #[must_use]
    pub fn numeric_value(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }
}

/// Action or function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operation {
    pub name: String,
    pub is_bound: bool,
    /// Name of the first parameter of a bound operation.
    pub binding_parameter: Option<String>,
    /// Return type without `Collection(...)`.
    pub return_type: Option<String>,
    pub returns_collection: bool,
    pub parameters: Vec<Parameter>,
    pub properties: Vec<Property>,
    pub navigation_properties: Vec<NavigationProperty>,
    pub referenced_by: Vec<String>,
}

/// Operation parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "Type")]
    pub ptype: String,
    pub nullable: bool,
    #[serde(rename = "structuralTypeName")]
    pub structural_type: Option<StructuralType>,
    /// Candidate types, more than one for entity valued parameters.
    pub type_descriptors: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntitySet {
    pub name: String,
    pub entity_set_name: String,
    /// Qualified entity type name (`Microsoft.Dynamics.CRM.account`).
    pub entity_type: String,
}

/// Complete schema graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaGraph {
    pub entity_types: Vec<EntityType>,
    pub entity_sets: Vec<EntitySet>,
    pub complex_types: Vec<ComplexType>,
    pub enum_types: Vec<EnumType>,
    pub actions: Vec<Operation>,
    pub functions: Vec<Operation>,
}

impl SchemaGraph {
    #[must_use]
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enum_types.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Operation> {
        self.actions.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Operation> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Actions followed by functions.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.actions.iter().chain(self.functions.iter())
    }
}
