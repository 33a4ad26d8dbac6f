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

//! Dataverse metadata API model.
//!
//! Shapes of the `RetrieveMetadataChanges` response as returned by the
//! Web API (PascalCase JSON). Only fields used by the schema model are
//! declared, everything else is ignored during deserialization. The
//! server sends explicit `null` for many absent values, so collections
//! are deserialized with [`null_as_default`].

use serde::de::Error as DeError;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::convert::TryFrom;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use uuid::Uuid;

/// Response of the `RetrieveMetadataChanges` function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RetrieveMetadataChangesResponse {
    /// Zero or one record per requested entity.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_metadata: Vec<ComplexEntityMetadata>,
}

/// Entity level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComplexEntityMetadata {
    pub metadata_id: Option<Uuid>,
    pub logical_name: Option<String>,
    pub schema_name: Option<String>,
    pub entity_set_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<AttributeMetadata>,
}

/// Attribute level metadata.
///
/// Kind specific fields (`Targets`, `OptionSet`, `Format`,
/// `DateTimeBehavior`) are only present for the matching attribute kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeMetadata {
    pub metadata_id: Option<Uuid>,
    #[serde(default)]
    pub logical_name: String,
    pub schema_name: Option<String>,
    pub attribute_type: Option<String>,
    pub attribute_type_name: Option<ManagedValue<String>>,
    pub required_level: Option<ManagedValue<RequiredLevel>>,
    pub description: Option<Label>,
    pub display_name: Option<Label>,
    pub attribute_of: Option<String>,
    pub source_type: Option<i32>,
    pub is_logical: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,
    pub option_set: Option<OptionSetMetadata>,
    pub format: Option<String>,
    pub date_time_behavior: Option<ManagedValue<String>>,
}

impl AttributeMetadata {
    /// Value of `AttributeTypeName` (`StringType`, `LookupType`, ...).
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.attribute_type_name.as_ref().map(|v| v.value.as_str())
    }

    /// Required level of the attribute. Missing value is `None` level.
    #[must_use]
    pub fn required_level(&self) -> RequiredLevel {
        self.required_level
            .as_ref()
            .map_or(RequiredLevel::None, |v| v.value)
    }
}

/// Option set attached to picklist, status and state attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSetMetadata {
    #[serde(default)]
    pub name: String,
    pub is_global: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionMetadata>,
}

impl OptionSetMetadata {
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.is_global.unwrap_or(false)
    }
}

/// One option of the option set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionMetadata {
    pub value: i64,
    pub label: Option<Label>,
}

/// Localizable label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    #[serde(default, deserialize_with = "null_as_default")]
    pub localized_labels: Vec<LocalizedLabel>,
    pub user_localized_label: Option<LocalizedLabel>,
}

impl Label {
    /// Label text in the language of the calling user.
    #[must_use]
    pub fn user_label(&self) -> Option<&str> {
        self.user_localized_label.as_ref().map(|l| l.label.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedLabel {
    #[serde(default)]
    pub label: String,
    pub language_code: Option<i32>,
}

/// Managed property wrapper (`{"Value": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedValue<T> {
    pub value: T,
}

/// `AttributeRequiredLevel` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequiredLevel {
    #[default]
    None,
    SystemRequired,
    ApplicationRequired,
    Recommended,
}

impl RequiredLevel {
    const fn from_number(v: u64) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            1 => Some(Self::SystemRequired),
            2 => Some(Self::ApplicationRequired),
            3 => Some(Self::Recommended),
            _ => None,
        }
    }

    /// Name used by the Web API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::SystemRequired => "SystemRequired",
            Self::ApplicationRequired => "ApplicationRequired",
            Self::Recommended => "Recommended",
        }
    }
}

impl Serialize for RequiredLevel {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}

// The Web API returns the enum member name, older endpoints and
// cached files may carry the numeric value.
impl<'de> Deserialize<'de> for RequiredLevel {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct RlVisitor {}
        impl Visitor<'_> for RlVisitor {
            type Value = RequiredLevel;

            fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
                formatter.write_str("AttributeRequiredLevel name or number")
            }
            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                match value {
                    "None" => Ok(RequiredLevel::None),
                    "SystemRequired" => Ok(RequiredLevel::SystemRequired),
                    "ApplicationRequired" => Ok(RequiredLevel::ApplicationRequired),
                    "Recommended" => Ok(RequiredLevel::Recommended),
                    _ => Err(DeError::custom(format!("unknown required level {value}"))),
                }
            }
            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                RequiredLevel::from_number(value)
                    .ok_or_else(|| DeError::custom(format!("unknown required level {value}")))
            }
            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .ok()
                    .and_then(RequiredLevel::from_number)
                    .ok_or_else(|| DeError::custom(format!("unknown required level {value}")))
            }
        }

        de.deserialize_any(RlVisitor {})
    }
}

/// Deserialize explicit `null` as the default value.
///
/// # Errors
///
/// Any error of the inner deserializer.
pub fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
