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

use crate::config::ConfigError;
use crate::edmx::ValidateError;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Schema model errors.
#[derive(Debug)]
pub enum ModelError {
    /// Metadata service failure.
    Service(Box<dyn StdError + Send + Sync>),
    /// EDMX document is malformed.
    Edmx(ValidateError),
    /// Metadata API has no record for the configured entity.
    NotADataverseEntity(String),
    /// `generate` was already called on this model.
    AlreadyGenerated,
    /// Error while processing an entity.
    Entity(String, Box<ModelError>),
}

impl ModelError {
    pub fn service<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Service(Box::new(err))
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Service(err) => write!(f, "metadata service error: {err}"),
            Self::Edmx(err) => write!(f, "EDMX format validation error: {err}"),
            Self::NotADataverseEntity(name) => write!(
                f,
                "{name} is not a Dataverse entity, remove it from the .dataverse-gen.json"
            ),
            Self::AlreadyGenerated => "schema model is already generated".fmt(f),
            Self::Entity(name, err) => write!(f, "entity {name}: {err}"),
        }
    }
}

impl StdError for ModelError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Service(err) => Some(err.as_ref()),
            Self::Edmx(err) => Some(err),
            Self::Entity(_, err) => Some(err.as_ref()),
            Self::NotADataverseEntity(_) | Self::AlreadyGenerated => None,
        }
    }
}

impl From<ValidateError> for ModelError {
    fn from(err: ValidateError) -> Self {
        Self::Edmx(err)
    }
}

/// Command line errors.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Model(ModelError),
    InvalidServerUrl(String),
    MissingToken(String),
    HttpClient(Box<dyn StdError + Send + Sync>),
    Serialize(JsonError),
    WriteOutput(PathBuf, IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Model(err) => write!(f, "schema model error: {err}"),
            Self::InvalidServerUrl(url) => write!(f, "invalid server url: {url}"),
            Self::MissingToken(var) => {
                write!(f, "access token environment variable {var} is not set")
            }
            Self::HttpClient(err) => write!(f, "cannot create http client: {err}"),
            Self::Serialize(err) => write!(f, "cannot serialize schema model: {err}"),
            Self::WriteOutput(fname, err) => {
                write!(f, "failed write output file: {}: {err}", fname.display())
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::HttpClient(err) => Some(err.as_ref()),
            Self::Serialize(err) => Some(err),
            Self::WriteOutput(_, err) => Some(err),
            Self::InvalidServerUrl(_) | Self::MissingToken(_) => None,
        }
    }
}
