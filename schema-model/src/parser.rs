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

//! EDMX parser: builds the raw schema graph.
//!
//! Passes run in a fixed order: enums, entity types, entity sets,
//! entity set names (with removal of system entities), complex types,
//! actions and functions. Every collection is sorted by name, entity
//! and complex type properties as well. Enum types keep document
//! order, their members are sorted by numeric value.

use crate::edmx::complex_type::ComplexType as EdmxComplexType;
use crate::edmx::entity_container::EntityContainer;
use crate::edmx::entity_type::EntityType as EdmxEntityType;
use crate::edmx::enum_type::EnumType as EdmxEnumType;
use crate::edmx::operation::Operation as EdmxOperation;
use crate::edmx::property::Properties;
use crate::edmx::schema::Schema;
use crate::edmx::type_ref::short_name;
use crate::edmx::type_ref::TypeRef;
use crate::edmx::Edmx;
use crate::edmx::ValidateError;
use crate::model::ComplexType;
use crate::model::EntitySet;
use crate::model::EntityType;
use crate::model::EnumMember;
use crate::model::EnumType;
use crate::model::NavigationProperty;
use crate::model::Operation;
use crate::model::Parameter;
use crate::model::Property;
use crate::model::SchemaGraph;
use log::debug;

/// Entity types that are never generated.
pub const SYSTEM_ENTITIES: [&str; 4] = ["crmbaseentity", "principal", "crmmodelbaseentity", "expando"];

/// Namespace used by `EntitySet/@EntityType`.
pub const ENTITY_TYPE_NAMESPACE: &str = "Microsoft.Dynamics.CRM";

/// Parse EDMX text into the raw schema graph.
///
/// # Errors
///
/// Malformed XML or missing required elements.
pub fn parse(text: &str) -> Result<SchemaGraph, ValidateError> {
    let schema = Edmx::parse(text)?.data_services.schema;
    Ok(build(schema))
}

fn build(schema: Schema) -> SchemaGraph {
    let mut graph = SchemaGraph::default();
    read_enums(&mut graph, schema.enum_types);
    read_entity_types(&mut graph, schema.entity_types);
    read_entity_sets(&mut graph, schema.entity_container);
    set_entity_set_names(&mut graph);
    read_complex_types(&mut graph, schema.complex_types);
    graph.actions = read_operations(schema.actions);
    graph.functions = read_operations(schema.functions);
    debug!(
        "EDMX: {} entity types, {} entity sets, {} complex types, {} enums, {} actions, {} functions",
        graph.entity_types.len(),
        graph.entity_sets.len(),
        graph.complex_types.len(),
        graph.enum_types.len(),
        graph.actions.len(),
        graph.functions.len(),
    );
    graph
}

fn read_enums(graph: &mut SchemaGraph, enum_types: Vec<EdmxEnumType>) {
    graph.enum_types = enum_types
        .into_iter()
        .map(|e| {
            let mut enum_type = EnumType {
                name: e.name.into_inner(),
                members: e
                    .members
                    .into_iter()
                    .map(|m| EnumMember {
                        name: m.name,
                        value: m.value.unwrap_or_default(),
                    })
                    .collect(),
                ..EnumType::default()
            };
            enum_type.sort_members();
            enum_type
        })
        .collect();
}

fn read_entity_types(graph: &mut SchemaGraph, entity_types: Vec<EdmxEntityType>) {
    graph.entity_types = entity_types
        .into_iter()
        .map(|e| {
            let key_name = e.key_name().map(|k| k.inner().clone());
            let (properties, navigation_properties) = read_properties(e.properties);
            EntityType {
                name: e.name.into_inner(),
                base_type: e.base_type,
                is_abstract: e.r#abstract,
                key_name,
                properties,
                navigation_properties,
                ..EntityType::default()
            }
        })
        .collect();
    graph.entity_types.sort_by(|a, b| a.name.cmp(&b.name));
}

fn read_entity_sets(graph: &mut SchemaGraph, container: Option<EntityContainer>) {
    graph.entity_sets = container
        .map(|c| c.entity_sets)
        .unwrap_or_default()
        .into_iter()
        .map(|s| EntitySet {
            entity_set_name: s.name.clone(),
            name: s.name,
            entity_type: s.entity_type,
        })
        .collect();
    graph.entity_sets.sort_by(|a, b| a.name.cmp(&b.name));
}

fn set_entity_set_names(graph: &mut SchemaGraph) {
    graph
        .entity_types
        .retain(|e| !SYSTEM_ENTITIES.contains(&e.name.as_str()));
    let entity_sets = &graph.entity_sets;
    for entity in &mut graph.entity_types {
        if entity.is_abstract || entity.key_name.is_none() {
            continue;
        }
        let qualified = format!("{ENTITY_TYPE_NAMESPACE}.{}", entity.name);
        entity.entity_set_name = entity_sets
            .iter()
            .find(|s| s.entity_type == qualified)
            .map(|s| s.entity_set_name.clone());
    }
}

fn read_complex_types(
    graph: &mut SchemaGraph,
    complex_types: Vec<EdmxComplexType>,
) {
    graph.complex_types = complex_types
        .into_iter()
        .map(|c| {
            let (properties, navigation_properties) = read_properties(c.properties);
            ComplexType {
                name: c.name.into_inner(),
                properties,
                navigation_properties,
                ..ComplexType::default()
            }
        })
        .collect();
    graph.complex_types.sort_by(|a, b| a.name.cmp(&b.name));
}

fn read_operations(operations: Vec<EdmxOperation>) -> Vec<Operation> {
    let mut result: Vec<_> = operations
        .into_iter()
        .map(|op| {
            let (return_type, returns_collection) = op
                .return_type
                .map(|r| {
                    let tref = TypeRef::parse(&r.rtype);
                    (Some(tref.name().to_string()), tref.is_collection())
                })
                .unwrap_or((None, false));
            let parameters: Vec<_> = op
                .parameters
                .into_iter()
                .map(|p| Parameter {
                    name: p.name,
                    ptype: p.ptype,
                    nullable: p.nullable != Some(false),
                    ..Parameter::default()
                })
                .collect();
            let binding_parameter = if op.is_bound {
                parameters.first().map(|p| p.name.clone())
            } else {
                None
            };
            let (properties, navigation_properties) = read_properties(op.properties);
            Operation {
                name: op.name.into_inner(),
                is_bound: op.is_bound,
                binding_parameter,
                return_type,
                returns_collection,
                parameters,
                properties,
                navigation_properties,
                referenced_by: Vec::new(),
            }
        })
        .collect();
    result.sort_by(|a, b| a.name.cmp(&b.name));
    result
}

fn read_properties(properties: Properties) -> (Vec<Property>, Vec<NavigationProperty>) {
    let mut structural: Vec<_> = properties
        .structural
        .into_iter()
        .map(|p| Property {
            nullable: p.nullable,
            ..Property::declared(p.name.into_inner(), p.ptype)
        })
        .collect();
    structural.sort_by(|a, b| a.name.cmp(&b.name));

    let mut navigation: Vec<_> = properties
        .navigation
        .into_iter()
        .map(|n| {
            let full_name = n.name.into_inner();
            let tref = TypeRef::parse(&n.ptype);
            let constraint = n.referential_constraints.into_iter().next();
            NavigationProperty {
                name: short_name(&full_name).to_string(),
                ptype: tref.name().to_string(),
                logical_name: tref.short_name().to_string(),
                is_collection: tref.is_collection(),
                referenced_property: constraint.as_ref().map(|c| c.referenced_property.clone()),
                referential_constraint: constraint.map(|c| c.property),
                type_descriptor: None,
                full_name,
            }
        })
        .collect();
    navigation.sort_by(|a, b| a.name.cmp(&b.name));
    (structural, navigation)
}
