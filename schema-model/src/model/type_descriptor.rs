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

//! Semantic type descriptors produced by the type mapper.

use serde::Serialize;
use serde::Serializer;

/// Kind of the generated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutputType {
    #[serde(rename = "enumType")]
    Enum,
    #[serde(rename = "entityType")]
    Entity,
    #[serde(rename = "complexType")]
    Complex,
    #[serde(rename = "primitive")]
    Primitive,
    /// Type that cannot be expressed in the target type system
    /// (`crmbaseentity`, unsupported `Edm` primitives).
    #[serde(rename = "unknown")]
    Unknown,
}

/// Resolved type of a property or of one candidate of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Type name, `[]` suffix marks arrays.
    pub name: String,
    pub output_type: OutputType,
    /// Module the type is imported from. `None` for primitives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_location: Option<String>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, output_type: OutputType) -> Self {
        Self {
            name: name.into(),
            output_type,
            import_location: None,
        }
    }

    #[must_use]
    pub fn with_import(mut self, import_location: Option<String>) -> Self {
        self.import_location = import_location;
        self
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.name.ends_with(ARRAY_SUFFIX)
    }
}

/// Suffix appended to array type names.
pub const ARRAY_SUFFIX: &str = "[]";

/// Structural category of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralType {
    Collection,
    PrimitiveType,
    EnumerationType,
    EntityType,
    ComplexType,
}

impl StructuralType {
    /// Name of the category as consumed by templates. Complex types
    /// are passed the same way as entities.
    #[must_use]
    pub const fn structural_type_name(self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::PrimitiveType => "PrimitiveType",
            Self::EnumerationType => "EnumerationType",
            Self::EntityType | Self::ComplexType => "EntityType",
        }
    }
}

impl Serialize for StructuralType {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.structural_type_name())
    }
}
