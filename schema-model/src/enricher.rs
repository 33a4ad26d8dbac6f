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

//! Metadata enricher.
//!
//! Replaces the EDMX property stubs of an entity with properties built
//! from the metadata API attributes, registers option sets as enums
//! and collapses polymorphic lookup navigation properties.

use crate::context::SchemaBuildContext;
use crate::edmx::type_ref::short_name;
use crate::model::EntityType;
use crate::model::EnumMember;
use crate::model::EnumType;
use crate::model::Property;
use dataverse_gen_core::metadata::AttributeMetadata;
use dataverse_gen_core::metadata::ComplexEntityMetadata;
use dataverse_gen_core::metadata::Label;
use dataverse_gen_core::metadata::OptionSetMetadata;
use dataverse_gen_core::metadata::RequiredLevel;
use log::debug;
use log::warn;

const VIRTUAL_TYPE: &str = "VirtualType";

/// Enrich `entity` with `record`.
///
/// Enums registered on the way are appended to `enum_types` with the
/// entity as their referrer.
pub fn enrich(
    entity: &mut EntityType,
    record: &ComplexEntityMetadata,
    context: &mut SchemaBuildContext,
    enum_types: &mut Vec<EnumType>,
) {
    entity.schema_name.clone_from(&record.schema_name);
    entity.entity_set_name.clone_from(&record.entity_set_name);
    entity.properties = record
        .attributes
        .iter()
        .filter(|a| a.type_name() != Some(VIRTUAL_TYPE))
        .map(|attribute| enrich_attribute(entity, attribute, context, enum_types))
        .collect::<Vec<_>>();
    entity.properties.sort_by(|a, b| b.name.cmp(&a.name));
    debug!(
        "{}: {} properties, {} navigation properties",
        entity.name,
        entity.properties.len(),
        entity.navigation_properties.len()
    );
}

fn enrich_attribute(
    entity: &mut EntityType,
    attribute: &AttributeMetadata,
    context: &mut SchemaBuildContext,
    enum_types: &mut Vec<EnumType>,
) -> Property {
    let attribute_type = attribute.type_name().unwrap_or_default();
    let mut format = String::new();
    let mut is_multi_select = false;
    let mut option_set_enum = None;
    match attribute_type {
        "DateTimeType" => {
            format = format!(
                "{}:{}",
                attribute.format.as_deref().unwrap_or_default(),
                attribute
                    .date_time_behavior
                    .as_ref()
                    .map(|b| b.value.as_str())
                    .unwrap_or_default()
            );
        }
        "CustomerType" | "LookupType" => collapse_lookup(entity, attribute),
        "PicklistType" | "StatusType" | "StateType" | "MultiSelectPicklistType" => {
            is_multi_select = attribute_type == "MultiSelectPicklistType";
            match &attribute.option_set {
                Some(option_set) => {
                    option_set_enum = Some(add_enum(option_set, &entity.name, context, enum_types));
                }
                None => warn!(
                    "{}.{}: {attribute_type} attribute without option set",
                    entity.name, attribute.logical_name
                ),
            }
        }
        _ => (),
    }
    Property {
        name: attribute.logical_name.clone(),
        schema_name: attribute.schema_name.clone(),
        is_enum: option_set_enum.is_some(),
        ptype: option_set_enum.unwrap_or_else(|| attribute_type.to_string()),
        nullable: None,
        is_required: attribute.required_level() == RequiredLevel::ApplicationRequired,
        is_multi_select,
        format,
        display_name: label_text(attribute.display_name.as_ref()),
        description: label_text(attribute.description.as_ref()),
        attribute_of: attribute.attribute_of.clone(),
        source_type: attribute.source_type,
        type_descriptor: None,
    }
}

fn label_text(label: Option<&Label>) -> String {
    label
        .and_then(Label::user_label)
        .unwrap_or_default()
        .to_string()
}

/// Collapse the navigation properties of a polymorphic lookup.
///
/// EDMX declares one navigation property per target
/// (`parentcustomerid_account`, `parentcustomerid_contact`). They are
/// replaced by a single one named after the attribute whose type lists
/// all targets separated by commas.
pub fn collapse_lookup(entity: &mut EntityType, attribute: &AttributeMetadata) {
    if attribute.targets.is_empty() {
        return;
    }
    let prefix = format!("{}_", attribute.logical_name);
    let (related, rest): (Vec<_>, Vec<_>) = entity
        .navigation_properties
        .drain(..)
        .partition(|n| n.name.starts_with(&prefix));
    entity.navigation_properties = rest;
    if let Some(mut first) = related.into_iter().next() {
        first.ptype = attribute.targets.join(",");
        first.full_name.clone_from(&attribute.logical_name);
        first.name = short_name(&first.full_name).to_string();
        entity.navigation_properties.push(first);
    }
}

/// Register the enum of `option_set` used by `entity_name`. Returns
/// the enum name.
///
/// Entity scoped option sets are prefixed with the entity name. Global
/// option sets are registered once, later uses add a referrer.
pub fn add_enum(
    option_set: &OptionSetMetadata,
    entity_name: &str,
    context: &mut SchemaBuildContext,
    enum_types: &mut Vec<EnumType>,
) -> String {
    let name = if option_set.is_global() {
        if !context.register_global_option_set(&option_set.name) {
            if let Some(existing) = enum_types.iter_mut().find(|e| e.name == option_set.name) {
                if !existing.referenced_by.iter().any(|r| r == entity_name) {
                    existing.referenced_by.push(entity_name.to_string());
                }
            }
            return option_set.name.clone();
        }
        option_set.name.clone()
    } else {
        format!("{entity_name}_{}", option_set.name)
    };
    let mut enum_type = EnumType {
        name: name.clone(),
        members: option_set
            .options
            .iter()
            .map(|option| {
                let value = option.value.to_string();
                let label = option
                    .label
                    .as_ref()
                    .and_then(Label::user_label)
                    .map(make_code_safe)
                    .filter(|v| !v.is_empty());
                EnumMember {
                    name: label.unwrap_or_else(|| format!("_{value}")),
                    value,
                }
            })
            .collect(),
        referenced_by: vec![entity_name.to_string()],
        referenced_by_root: Vec::new(),
    };
    enum_type.sort_members();
    enum_types.push(enum_type);
    name
}

/// Turn a label into an identifier.
///
/// Characters other than ASCII letters, digits and `_` are removed.
/// One leading `_` is removed unless it is the whole name. A name
/// starting with a digit gets a `_` prefix.
#[must_use]
pub fn make_code_safe(label: &str) -> String {
    let mut name: String = label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.len() > 1 && name.starts_with('_') {
        name.remove(0);
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
