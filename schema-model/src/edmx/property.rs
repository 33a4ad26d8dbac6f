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
use crate::edmx::PropertyName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:Property
#[derive(Debug, Deserialize)]
pub struct DeStructuralProperty {
    #[serde(rename = "@Name")]
    pub name: PropertyName,
    #[serde(rename = "@Type")]
    pub ptype: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "Annotation", default)]
    pub annotations: Vec<Annotation>,
}

/// Element edm:NavigationProperty
#[derive(Debug, Deserialize)]
pub struct DeNavigationProperty {
    #[serde(rename = "@Name")]
    pub name: PropertyName,
    #[serde(rename = "@Type")]
    pub ptype: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
    #[serde(rename = "@Partner")]
    pub partner: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeNavigationPropertyItem>,
}

/// Items of edm:NavigationProperty
#[derive(Debug, Deserialize)]
pub enum DeNavigationPropertyItem {
    ReferentialConstraint(ReferentialConstraint),
    OnDelete(OnDelete),
    Annotation(Annotation),
}

/// Element edm:ReferentialConstraint
#[derive(Debug, Clone, Deserialize)]
pub struct ReferentialConstraint {
    #[serde(rename = "@Property")]
    pub property: String,
    #[serde(rename = "@ReferencedProperty")]
    pub referenced_property: String,
}

/// Element edm:OnDelete
#[derive(Debug, Deserialize)]
pub struct OnDelete {
    #[serde(rename = "@Action")]
    pub action: String,
}

/// Validated edm:Property.
#[derive(Debug)]
pub struct StructuralProperty {
    pub name: PropertyName,
    pub ptype: String,
    pub nullable: Option<bool>,
}

/// Validated edm:NavigationProperty.
#[derive(Debug)]
pub struct NavigationProperty {
    pub name: PropertyName,
    pub ptype: String,
    pub nullable: Option<bool>,
    pub partner: Option<String>,
    pub referential_constraints: Vec<ReferentialConstraint>,
}

impl DeStructuralProperty {
    /// # Errors
    ///
    /// Actually, doesn't return any errors. Keep it for consistency.
    pub fn validate(self) -> Result<StructuralProperty, ValidateError> {
        Ok(StructuralProperty {
            name: self.name,
            ptype: self.ptype,
            nullable: self.nullable,
        })
    }
}

impl DeNavigationProperty {
    /// # Errors
    ///
    /// Actually, doesn't return any errors. Keep it for consistency.
    pub fn validate(self) -> Result<NavigationProperty, ValidateError> {
        let referential_constraints = self
            .items
            .into_iter()
            .filter_map(|v| match v {
                DeNavigationPropertyItem::ReferentialConstraint(v) => Some(v),
                DeNavigationPropertyItem::OnDelete(_) | DeNavigationPropertyItem::Annotation(_) => {
                    None
                }
            })
            .collect();
        Ok(NavigationProperty {
            name: self.name,
            ptype: self.ptype,
            nullable: self.nullable,
            partner: self.partner,
            referential_constraints,
        })
    }
}

/// Properties of a structured type split by kind.
#[derive(Debug, Default)]
pub struct Properties {
    pub structural: Vec<StructuralProperty>,
    pub navigation: Vec<NavigationProperty>,
}

impl Properties {
    pub(crate) fn push_structural(
        mut self,
        p: DeStructuralProperty,
    ) -> Result<Self, ValidateError> {
        self.structural.push(p.validate()?);
        Ok(self)
    }

    pub(crate) fn push_navigation(
        mut self,
        p: DeNavigationProperty,
    ) -> Result<Self, ValidateError> {
        self.navigation.push(p.validate()?);
        Ok(self)
    }
}
