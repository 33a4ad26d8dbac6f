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

//! EDMX parser and validator for Dataverse `$metadata` documents.
//!
//! Deserialization happens in two steps. `De*` structures mirror the
//! XML as read by `quick-xml`: repeatable children are collected as a
//! list of items in document order. `validate` then folds the items
//! into typed sequences. A child element that occurs once, many times
//! or not at all always ends up as a `Vec`, so nothing after this
//! module deals with the singular form.

/// Element edmx:Edmx
pub mod edmx_root;

/// Element edmx:DataServices
pub mod data_services;

/// Element edm:Schema
pub mod schema;

/// Element edm:Property / edm:NavigationProperty
pub mod property;

/// Element edm:EntityType
pub mod entity_type;

/// Element edm:ComplexType
pub mod complex_type;

/// Element edm:EnumType
pub mod enum_type;

/// Element edm:Action / edm:Function
pub mod operation;

/// Element edm:EntityContainer
pub mod entity_container;

/// Type references (`Edm.String`, `Collection(mscrm.account)`).
pub mod type_ref;

use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use quick_xml::DeError;
use tagged_types::TaggedType;

pub type TypeName = TaggedType<String, TypeNameTag>;
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum TypeNameTag {}

pub type PropertyName = TaggedType<String, PropertyNameTag>;
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum PropertyNameTag {}

pub type OperationName = TaggedType<String, OperationNameTag>;
#[derive(tagged_types::Tag)]
#[implement(Clone, Hash, PartialEq, Eq)]
#[transparent(Debug, Display, Deserialize)]
#[capability(inner_access)]
pub enum OperationNameTag {}

pub type SchemaNamespace = String;

/// EDMX validation errors.
#[derive(Debug)]
pub enum ValidateError {
    /// XML deserialization error.
    XmlDeserialize(DeError),
    /// Invalid number of `DataServices`.
    WrongDataServicesNumber,
    /// Invalid number of `Schema` elements in `DataServices`.
    WrongSchemaNumber(usize),
    /// More than one `EntityContainer` in the schema.
    TooManyEntityContainers,
    /// In the `EntityType` too many keys.
    TooManyKeys,
    /// In the `Action` or `Function` too many return types.
    TooManyReturnTypes,
    /// Schema validation error.
    Schema(SchemaNamespace, Box<ValidateError>),
    /// `EntityType` validation error.
    EntityType(TypeName, Box<ValidateError>),
    /// `Action` or `Function` validation error.
    Operation(OperationName, Box<ValidateError>),
}

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::XmlDeserialize(err) => write!(f, "malformed EDMX document: {err}"),
            Self::WrongDataServicesNumber => {
                "EDMX document must contain exactly one edmx:DataServices element".fmt(f)
            }
            Self::WrongSchemaNumber(n) => {
                write!(f, "edmx:DataServices must contain exactly one Schema, found {n}")
            }
            Self::TooManyEntityContainers => "more than one EntityContainer".fmt(f),
            Self::TooManyKeys => "more than one Key".fmt(f),
            Self::TooManyReturnTypes => "more than one ReturnType".fmt(f),
            Self::Schema(ns, err) => write!(f, "schema {ns}: {err}"),
            Self::EntityType(name, err) => write!(f, "entity type {name}: {err}"),
            Self::Operation(name, err) => write!(f, "operation {name}: {err}"),
        }
    }
}

impl StdError for ValidateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::XmlDeserialize(err) => Some(err),
            _ => None,
        }
    }
}

/// Reexport of Edmx type to root.
pub type Edmx = edmx_root::Edmx;

/// Element edm:Annotation. Only the term is kept.
#[derive(Debug, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@Term")]
    pub term: String,
}

/// Element edm:Annotations (schema level annotation group).
#[derive(Debug, Deserialize)]
pub struct Annotations {
    #[serde(rename = "@Target")]
    pub target: String,
}

/// Element edm:Term.
#[derive(Debug, Deserialize)]
pub struct Term {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "@Type")]
    pub ttype: Option<String>,
}

/// Element edm:TypeDefinition.
#[derive(Debug, Deserialize)]
pub struct TypeDefinition {
    #[serde(rename = "@Name")]
    pub name: TypeName,
    #[serde(rename = "@UnderlyingType")]
    pub underlying_type: String,
}
