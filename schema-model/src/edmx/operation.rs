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
use crate::edmx::OperationName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:Action or edm:Function. Both share the same content
/// model for the purposes of the schema model.
#[derive(Debug, Deserialize)]
pub struct DeOperation {
    #[serde(rename = "@Name")]
    pub name: OperationName,
    #[serde(rename = "@IsBound")]
    pub is_bound: Option<bool>,
    #[serde(rename = "@EntitySetPath")]
    pub entity_set_path: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeOperationItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeOperationItem {
    ReturnType(ReturnType),
    Parameter(Parameter),
    #[serde(rename = "Property")]
    StructuralProperty(DeStructuralProperty),
    NavigationProperty(DeNavigationProperty),
    Annotation(Annotation),
}

/// Element edm:Parameter
#[derive(Debug, Deserialize)]
pub struct Parameter {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Type")]
    pub ptype: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
}

/// Element edm:ReturnType
#[derive(Debug, Deserialize)]
pub struct ReturnType {
    #[serde(rename = "@Type")]
    pub rtype: String,
    #[serde(rename = "@Nullable")]
    pub nullable: Option<bool>,
}

/// Validated edm:Action or edm:Function element.
#[derive(Debug)]
pub struct Operation {
    pub name: OperationName,
    pub is_bound: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<ReturnType>,
    pub properties: Properties,
}

impl DeOperation {
    /// # Errors
    ///
    /// `ValidateError::Operation` error if more than one edm:ReturnType specified.
    pub fn validate(self) -> Result<Operation, ValidateError> {
        let name = self.name;
        let mut return_types = Vec::new();
        let mut parameters = Vec::new();
        let properties = self
            .items
            .into_iter()
            .try_fold(Properties::default(), |ps, v| match v {
                DeOperationItem::ReturnType(v) => {
                    return_types.push(v);
                    Ok(ps)
                }
                DeOperationItem::Parameter(v) => {
                    parameters.push(v);
                    Ok(ps)
                }
                DeOperationItem::StructuralProperty(p) => ps.push_structural(p),
                DeOperationItem::NavigationProperty(p) => ps.push_navigation(p),
                DeOperationItem::Annotation(_) => Ok(ps),
            })
            .map_err(|e| ValidateError::Operation(name.clone(), Box::new(e)))?;
        if return_types.len() > 1 {
            return Err(ValidateError::Operation(
                name,
                Box::new(ValidateError::TooManyReturnTypes),
            ));
        }
        Ok(Operation {
            name,
            is_bound: self.is_bound.unwrap_or(false),
            return_type: return_types.pop(),
            parameters,
            properties,
        })
    }
}
