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
use crate::edmx::TypeName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:ComplexType
#[derive(Debug, Deserialize)]
pub struct DeComplexType {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "@BaseType")]
    pub base_type: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeComplexTypeItem>,
}

/// Items of edm:ComplexType
#[derive(Debug, Deserialize)]
pub enum DeComplexTypeItem {
    #[serde(rename = "Property")]
    StructuralProperty(DeStructuralProperty),
    NavigationProperty(DeNavigationProperty),
    Annotation(Annotation),
}

/// Validated edm:ComplexType
#[derive(Debug)]
pub struct ComplexType {
    pub name: TypeName,
    pub base_type: Option<String>,
    pub properties: Properties,
}

impl DeComplexType {
    /// # Errors
    ///
    /// Actually, doesn't return any errors. Keep it for consistency.
    pub fn validate(self) -> Result<ComplexType, ValidateError> {
        let properties =
            self.items
                .into_iter()
                .try_fold(Properties::default(), |ps, v| match v {
                    DeComplexTypeItem::StructuralProperty(p) => ps.push_structural(p),
                    DeComplexTypeItem::NavigationProperty(p) => ps.push_navigation(p),
                    DeComplexTypeItem::Annotation(_) => Ok(ps),
                })?;
        Ok(ComplexType {
            name: self.name,
            base_type: self.base_type,
            properties,
        })
    }
}
