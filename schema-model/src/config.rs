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

//! Generator options (`.dataverse-gen.json`).
//!
//! Options are read from JSON, or from TOML when the file name ends
//! with `.toml`. Every field is optional. Absent fields keep their
//! defaults and `referencedTypes` entries are merged field by field
//! over the built-in ones, so a user only lists what differs.

use crate::model::OutputType;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Error as JsonError;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use toml::de::Error as TomlError;

/// Default options file name.
pub const DEFAULT_CONFIG_FILE: &str = ".dataverse-gen.json";

/// Key of the import prefix for enums in `referencedTypes`.
pub const ENUMS_KEY: &str = "enums";
/// Key of the import prefix for complex types in `referencedTypes`.
pub const COMPLEX_TYPES_KEY: &str = "complexTypes";
/// Key of the import prefix for entity types in `referencedTypes`.
pub const ENTITY_TYPES_KEY: &str = "entityTypes";

const DATAVERSE_IFY: &str = "dataverse-ify";

/// Name and import override of a referenced type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencedType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<String>,
}

impl ReferencedType {
    fn new(name: Option<&str>, import: Option<&str>) -> Self {
        Self {
            name: name.map(Into::into),
            import: import.map(Into::into),
        }
    }

    fn merge(self, user: Self) -> Self {
        Self {
            name: user.name.or(self.name),
            import: user.import.or(self.import),
        }
    }
}

pub type ReferencedTypes = BTreeMap<String, ReferencedType>;

/// Output settings. Only `use_cache` is used by the schema model, the
/// rest is kept for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputOptions {
    pub use_cache: bool,
    pub output_root: String,
    pub template_root: String,
    pub file_suffix: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            use_cache: false,
            output_root: "./src/dataverse-gen".into(),
            template_root: "./_templates".into(),
            file_suffix: ".ts".into(),
        }
    }
}

/// Generator options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataverseGenOptions {
    /// Entities to generate. Empty list generates none.
    pub entities: Vec<String>,
    /// Actions to generate. Empty list generates none.
    pub actions: Vec<String>,
    /// Functions to generate. Empty list generates none.
    pub functions: Vec<String>,
    #[serde(deserialize_with = "merge_referenced_types")]
    pub referenced_types: ReferencedTypes,
    pub output: OutputOptions,
    pub generate_index: bool,
    pub generate_form_context: bool,
}

impl Default for DataverseGenOptions {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            actions: Vec::new(),
            functions: Vec::new(),
            referenced_types: default_referenced_types(),
            output: OutputOptions::default(),
            generate_index: false,
            generate_form_context: false,
        }
    }
}

impl DataverseGenOptions {
    /// Read options from `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Io` if failed to read the file
    /// - `ConfigError::Json` / `ConfigError::Toml` if the content is
    ///   not valid options.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path).map_err(|e| ConfigError::Io(path.into(), e))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| ConfigError::Io(path.into(), e))?;
        if path.extension().map_or(false, |ext| ext == "toml") {
            toml::from_str(&content).map_err(|e| ConfigError::Toml(path.into(), e))
        } else {
            serde_json::from_str(&content).map_err(|e| ConfigError::Json(path.into(), e))
        }
    }

    /// Replacement name configured for `type_name`.
    #[must_use]
    pub fn mapped_name<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.referenced_types
            .get(type_name)
            .and_then(|t| t.name.as_deref())
            .unwrap_or(type_name)
    }

    /// Import location of `type_name` of the given kind.
    ///
    /// An explicit entry for the type wins, even if it has no import.
    /// Otherwise the per-kind prefix is followed by the type name.
    /// Primitive and unknown types have no import.
    #[must_use]
    pub fn import_location(&self, type_name: &str, kind: OutputType) -> Option<String> {
        let key = type_name.strip_suffix("[]").unwrap_or(type_name);
        if let Some(explicit) = self.referenced_types.get(key) {
            return explicit.import.clone();
        }
        let prefix_key = match kind {
            OutputType::Enum => ENUMS_KEY,
            OutputType::Entity => ENTITY_TYPES_KEY,
            OutputType::Complex => COMPLEX_TYPES_KEY,
            OutputType::Primitive | OutputType::Unknown => return None,
        };
        self.referenced_types
            .get(prefix_key)
            .and_then(|t| t.import.as_ref())
            .map(|prefix| format!("{prefix}{key}"))
    }
}

/// Built-in `referencedTypes`.
#[must_use]
pub fn default_referenced_types() -> ReferencedTypes {
    let lib = |name: &str| (name.to_string(), ReferencedType::new(Some(name), Some(DATAVERSE_IFY)));
    let prefix = |key: &str, import: &str| (key.to_string(), ReferencedType::new(None, Some(import)));
    vec![
        ("Object".into(), ReferencedType::new(Some("ObjectValue"), None)),
        lib("Guid"),
        ("Entity".into(), ReferencedType::new(Some("IEntity"), Some(DATAVERSE_IFY))),
        lib("EntityReference"),
        lib("WebApiExecuteRequest"),
        lib("StructuralProperty"),
        lib("OperationType"),
        lib("ActivityParty"),
        prefix(ENUMS_KEY, "../enums/"),
        prefix(COMPLEX_TYPES_KEY, "../complextypes/"),
        prefix(ENTITY_TYPES_KEY, "../entities/"),
    ]
    .into_iter()
    .collect()
}

fn merge_referenced_types<'de, D: Deserializer<'de>>(de: D) -> Result<ReferencedTypes, D::Error> {
    let user = ReferencedTypes::deserialize(de)?;
    Ok(user
        .into_iter()
        .fold(default_referenced_types(), |mut merged, (key, value)| {
            let entry = merged.remove(&key).unwrap_or_default().merge(value);
            merged.insert(key, entry);
            merged
        }))
}

/// Options loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, IoError),
    Json(PathBuf, JsonError),
    Toml(PathBuf, TomlError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(path, err) => write!(f, "cannot read options file {}: {err}", path.display()),
            Self::Json(path, err) => write!(f, "invalid options file {}: {err}", path.display()),
            Self::Toml(path, err) => write!(f, "invalid options file {}: {err}", path.display()),
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Json(_, err) => Some(err),
            Self::Toml(_, err) => Some(err),
        }
    }
}
