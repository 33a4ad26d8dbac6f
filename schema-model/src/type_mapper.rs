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

//! Type mapper: raw platform types to semantic type descriptors.
//!
//! Properties resolve to exactly one [`TypeDescriptor`]. Operation
//! parameters additionally get a structural category and may resolve
//! to several candidates: an entity valued parameter accepts either
//! an `EntityReference` or the concrete entity.

use crate::config::DataverseGenOptions;
use crate::edmx::type_ref::short_name;
use crate::edmx::type_ref::TypeRef;
use crate::model::type_descriptor::ARRAY_SUFFIX;
use crate::model::NavigationProperty;
use crate::model::OutputType;
use crate::model::Parameter;
use crate::model::Property;
use crate::model::SchemaGraph;
use crate::model::StructuralType;
use crate::model::TypeDescriptor;
use std::collections::HashMap;
use std::collections::HashSet;

/// Catch-all base entity that has no typed representation.
pub const BASE_ENTITY: &str = "crmbaseentity";

/// Generic entity reference type.
pub const ENTITY_REFERENCE: &str = "EntityReference";

/// Name of the binding parameter of collection bound operations.
pub const ENTITY_SET_PARAMETER: &str = "entityset";

const MSCRM_PREFIX: &str = "mscrm";
const EDM_PREFIX: &str = "Edm";

/// `Edm` primitive to target primitive name.
#[must_use]
pub fn edm_primitive(name: &str) -> Option<&'static str> {
    Some(match name {
        "Edm.Guid" => "Guid",
        "Edm.String" | "Edm.Duration" | "Edm.Binary" => "string",
        "Edm.Int16" | "Edm.Int32" | "Edm.Int64" | "Edm.Double" | "Edm.Decimal" => "number",
        "Edm.Boolean" => "boolean",
        "Edm.DateTimeOffset" => "Date",
        _ => return None,
    })
}

/// Attribute type name (`AttributeTypeName`) to target type name.
#[must_use]
pub fn attribute_primitive(name: &str) -> Option<&'static str> {
    Some(match name {
        "MultiSelectPicklistType" => "number[]",
        "PicklistType" | "StateType" | "StatusType" | "ManagedPropertyType" => "number",
        "UniqueidentifierType" => "Guid",
        "ImageType" | "FileType" | "StringType" | "MemoType" | "EntityNameType" => "string",
        "BigIntType" | "IntegerType" | "DoubleType" | "DecimalType" | "MoneyType" => "number",
        "BooleanType" => "boolean",
        "DateTimeType" => "Date",
        "CustomerType" | "LookupType" | "OwnerType" => ENTITY_REFERENCE,
        "PartyListType" => "ActivityParty[]",
        _ => return None,
    })
}

/// Name lookup over the types of the graph.
#[derive(Debug, Default)]
pub struct TypeIndex {
    enums: HashSet<String>,
    complex_types: HashSet<String>,
    /// Logical name to schema name.
    entities: HashMap<String, Option<String>>,
    /// Schema name to schema name.
    entity_schema_names: HashSet<String>,
    /// Lowercase logical name to emitted name.
    entities_ci: HashMap<String, String>,
}

impl TypeIndex {
    #[must_use]
    pub fn build(graph: &SchemaGraph) -> Self {
        let mut index = Self {
            enums: graph.enum_types.iter().map(|e| e.name.clone()).collect(),
            complex_types: graph.complex_types.iter().map(|c| c.name.clone()).collect(),
            ..Self::default()
        };
        for e in &graph.entity_types {
            let emitted = e.schema_name.clone().unwrap_or_else(|| e.name.clone());
            if let Some(schema_name) = &e.schema_name {
                index.entity_schema_names.insert(schema_name.clone());
            }
            index.entities.insert(e.name.clone(), e.schema_name.clone());
            index
                .entities_ci
                .entry(e.name.to_lowercase())
                .or_insert(emitted);
        }
        index
    }

    fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    fn is_complex(&self, name: &str) -> bool {
        self.complex_types.contains(name)
    }

    /// Emitted name of the entity with schema name or logical name `name`.
    fn entity(&self, name: &str) -> Option<String> {
        if self.entity_schema_names.contains(name) {
            return Some(name.to_string());
        }
        self.entities
            .get(name)
            .map(|schema_name| schema_name.clone().unwrap_or_else(|| name.to_string()))
    }

    /// Emitted name of the entity with logical name `name`, ignoring case.
    fn entity_ci(&self, name: &str) -> Option<&str> {
        self.entities_ci.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Resolves raw types against the graph and the options.
pub struct TypeMapper<'a> {
    index: TypeIndex,
    options: &'a DataverseGenOptions,
}

impl<'a> TypeMapper<'a> {
    #[must_use]
    pub const fn new(index: TypeIndex, options: &'a DataverseGenOptions) -> Self {
        Self { index, options }
    }

    /// Annotate every property and parameter of the graph.
    ///
    /// Covers complex type properties and navigation properties,
    /// operation properties and parameters and entity properties.
    pub fn apply(&self, graph: &mut SchemaGraph) {
        for complex_type in &mut graph.complex_types {
            complex_type
                .properties
                .iter_mut()
                .for_each(|p| self.resolve_property(p));
            complex_type
                .navigation_properties
                .iter_mut()
                .for_each(|n| self.resolve_navigation(n));
        }
        for operation in graph.actions.iter_mut().chain(graph.functions.iter_mut()) {
            operation
                .properties
                .iter_mut()
                .for_each(|p| self.resolve_property(p));
            for parameter in &mut operation.parameters {
                self.resolve_parameter(parameter);
            }
        }
        for entity in &mut graph.entity_types {
            entity
                .properties
                .iter_mut()
                .for_each(|p| self.resolve_property(p));
        }
    }

    /// Set the type descriptor of `property`. Marks the property as
    /// enum typed if its type is a known enum.
    pub fn resolve_property(&self, property: &mut Property) {
        let (descriptor, is_enum) =
            self.property_type(&property.ptype, property.is_enum, property.is_multi_select);
        property.is_enum = is_enum;
        property.type_descriptor = Some(descriptor);
    }

    /// Set the type descriptor of a complex type navigation property.
    pub fn resolve_navigation(&self, nav: &mut NavigationProperty) {
        let raw = if nav.is_collection {
            TypeRef::CollectionOf(&nav.ptype).to_string()
        } else {
            nav.ptype.clone()
        };
        nav.type_descriptor = Some(self.property_type(&raw, false, false).0);
    }

    /// Resolve a property type. Returns the descriptor and whether the
    /// type is an enum.
    #[must_use]
    pub fn property_type(
        &self,
        raw: &str,
        is_enum: bool,
        is_multi_select: bool,
    ) -> (TypeDescriptor, bool) {
        let tref = TypeRef::parse(raw);
        let type_name = tref.name();
        let mut is_enum = is_enum;
        let mut kind = if is_enum {
            OutputType::Enum
        } else {
            OutputType::Primitive
        };
        let mapped: Option<&str> =
            edm_primitive(type_name).or_else(|| attribute_primitive(type_name));
        let mut name = mapped
            .unwrap_or_else(|| short_name(type_name))
            .to_string();

        if name == BASE_ENTITY {
            kind = OutputType::Unknown;
        } else {
            if self.index.is_enum(&name) {
                is_enum = true;
                kind = OutputType::Enum;
            }
            name = self.options.mapped_name(&name).to_string();
            if let Some(entity) = self.index.entity(&name) {
                name = entity;
                kind = OutputType::Entity;
            }
            if self.index.is_complex(&name) {
                kind = OutputType::Complex;
            }
        }
        if tref.is_collection() || is_multi_select {
            name.push_str(ARRAY_SUFFIX);
        }
        let import = self.options.import_location(&name, kind);
        (TypeDescriptor::new(name, kind).with_import(import), is_enum)
    }

    /// Structural category of a parameter type.
    #[must_use]
    pub fn structural_type(&self, raw: &str) -> StructuralType {
        let tref = TypeRef::parse(raw);
        if tref.is_collection() {
            return StructuralType::Collection;
        }
        let short = tref.short_name();
        if raw.starts_with(MSCRM_PREFIX) {
            return if self.index.entity_ci(short).is_some() {
                StructuralType::EntityType
            } else if self.index.is_enum(short) {
                StructuralType::EnumerationType
            } else {
                StructuralType::ComplexType
            };
        }
        if raw.starts_with(EDM_PREFIX) {
            StructuralType::PrimitiveType
        } else {
            StructuralType::ComplexType
        }
    }

    /// Set structural category and candidate types of `parameter`.
    ///
    /// The binding parameter of a collection bound operation
    /// (`entityset`) is declared as a collection but binds one entity:
    /// its `Collection(...)` wrapper is removed and it is categorized as
    /// an entity.
    pub fn resolve_parameter(&self, parameter: &mut Parameter) {
        let (structural, descriptors) = self.parameter_types(&parameter.ptype);
        parameter.type_descriptors = descriptors;
        parameter.structural_type = Some(structural);
        if parameter.name == ENTITY_SET_PARAMETER && structural == StructuralType::Collection {
            parameter.ptype = TypeRef::parse(&parameter.ptype).name().to_string();
            parameter.structural_type = Some(StructuralType::EntityType);
        }
    }

    /// Resolve a parameter type into its structural category and
    /// candidate types.
    #[must_use]
    pub fn parameter_types(&self, raw: &str) -> (StructuralType, Vec<TypeDescriptor>) {
        let mut structural = self.structural_type(raw);
        let tref = TypeRef::parse(raw);
        let collection = tref.is_collection();
        let array = |name: &str| {
            if collection {
                format!("{name}{ARRAY_SUFFIX}")
            } else {
                name.to_string()
            }
        };
        let type_name = tref.name();

        let (names, kind) = if type_name.starts_with("Edm.") {
            match edm_primitive(type_name) {
                Some(primitive) => (vec![array(primitive)], OutputType::Primitive),
                None => (vec![array(type_name)], OutputType::Unknown),
            }
        } else {
            let short = short_name(type_name);
            if short == BASE_ENTITY {
                (vec![array(short)], OutputType::Unknown)
            } else {
                if structural == StructuralType::ComplexType && self.index.entity_ci(short).is_some() {
                    structural = StructuralType::EntityType;
                }
                let entity = self.index.entity_ci(short);
                match (structural, entity) {
                    (StructuralType::EntityType, Some(entity))
                    | (StructuralType::Collection, Some(entity)) => (
                        vec![array(ENTITY_REFERENCE), array(entity)],
                        OutputType::Entity,
                    ),
                    (StructuralType::EnumerationType, _) => (vec![array(short)], OutputType::Enum),
                    (StructuralType::Collection, None) if self.index.is_enum(short) => {
                        (vec![array(short)], OutputType::Enum)
                    }
                    _ => (
                        vec![array(self.options.mapped_name(short))],
                        OutputType::Complex,
                    ),
                }
            }
        };
        let descriptors = names
            .into_iter()
            .map(|name| {
                let import = self.options.import_location(&name, kind);
                TypeDescriptor::new(name, kind).with_import(import)
            })
            .collect();
        (structural, descriptors)
    }
}
