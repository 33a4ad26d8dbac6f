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
use crate::edmx::TypeName;
use crate::edmx::ValidateError;
use serde::Deserialize;

/// Element edm:EnumType
#[derive(Debug, Deserialize)]
pub struct DeEnumType {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "@UnderlyingType")]
    pub underlying_type: Option<String>,
    #[serde(rename = "@IsFlags")]
    pub is_flags: Option<bool>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeEnumTypeItem>,
}

#[derive(Debug, Deserialize)]
pub enum DeEnumTypeItem {
    Member(EnumMember),
    Annotation(Annotation),
}

/// Element edm:Member
#[derive(Debug, Deserialize)]
pub struct EnumMember {
    #[serde(rename = "@Name")]
    pub name: String,
    /// Absent value means position of the member (zero based).
    #[serde(rename = "@Value")]
    pub value: Option<String>,
}

/// Validated edm:EnumType.
#[derive(Debug)]
pub struct EnumType {
    pub name: TypeName,
    pub underlying_type: Option<String>,
    pub is_flags: bool,
    pub members: Vec<EnumMember>,
}

impl DeEnumType {
    /// # Errors
    ///
    /// Actually, doesn't return any errors. Keeping constent calls.
    pub fn validate(self) -> Result<EnumType, ValidateError> {
        let members = self
            .items
            .into_iter()
            .filter_map(|v| match v {
                DeEnumTypeItem::Member(v) => Some(v),
                DeEnumTypeItem::Annotation(_) => None,
            })
            .enumerate()
            .map(|(no, mut m)| {
                m.value.get_or_insert_with(|| no.to_string());
                m
            })
            .collect();
        Ok(EnumType {
            name: self.name,
            underlying_type: self.underlying_type,
            is_flags: self.is_flags.unwrap_or(false),
            members,
        })
    }
}
