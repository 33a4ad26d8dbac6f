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

use crate::edmx::property::DeNavigationProperty;
use crate::edmx::property::DeStructuralProperty;
use crate::edmx::property::Properties;
use crate::edmx::Annotation;
use crate::edmx::PropertyName;
use crate::edmx::TypeName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:EntityType
#[derive(Debug, Deserialize)]
pub struct DeEntityType {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "@BaseType")]
    pub base_type: Option<String>,
    #[serde(rename = "@Abstract")]
    pub r#abstract: Option<bool>,
    #[serde(rename = "@OpenType")]
    pub open_type: Option<bool>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeEntityTypeItem>,
}

/// Element edm:Key
#[derive(Debug, Deserialize)]
pub struct Key {
    #[serde(rename = "PropertyRef", default)]
    pub property_ref: Vec<PropertyRef>,
}

/// Element edm:PropertyRef
#[derive(Debug, Deserialize)]
pub struct PropertyRef {
    #[serde(rename = "@Name")]
    pub name: PropertyName,
}

/// Items of edm:EntityType
#[derive(Debug, Deserialize)]
pub enum DeEntityTypeItem {
    Key(Key),
    #[serde(rename = "Property")]
    StructuralProperty(DeStructuralProperty),
    NavigationProperty(DeNavigationProperty),
    Annotation(Annotation),
}

/// Validated edm:EntityType
#[derive(Debug)]
pub struct EntityType {
    pub name: TypeName,
    pub base_type: Option<String>,
    pub r#abstract: bool,
    pub key: Option<Key>,
    pub properties: Properties,
}

impl EntityType {
    /// Name of the first key property.
    #[must_use]
    pub fn key_name(&self) -> Option<&PropertyName> {
        self.key
            .as_ref()
            .and_then(|k| k.property_ref.first())
            .map(|r| &r.name)
    }
}

impl DeEntityType {
    /// # Errors
    ///
    /// - `ValidateError::EntityType` if error occured. Internal `ValidateError` contains details.
    pub fn validate(self) -> Result<EntityType, ValidateError> {
        let name = self.name;
        let mut keys = Vec::new();
        let properties = self
            .items
            .into_iter()
            .try_fold(Properties::default(), |ps, v| match v {
                DeEntityTypeItem::Key(k) => {
                    keys.push(k);
                    Ok(ps)
                }
                DeEntityTypeItem::StructuralProperty(p) => ps.push_structural(p),
                DeEntityTypeItem::NavigationProperty(p) => ps.push_navigation(p),
                DeEntityTypeItem::Annotation(_) => Ok(ps),
            })
            .map_err(|e| ValidateError::EntityType(name.clone(), Box::new(e)))?;
        if keys.len() > 1 {
            return Err(ValidateError::EntityType(
                name,
                Box::new(ValidateError::TooManyKeys),
            ));
        }
        Ok(EntityType {
            name,
            key: keys.into_iter().next(),
            base_type: self.base_type,
            r#abstract: self.r#abstract.unwrap_or(false),
            properties,
        })
    }
}
