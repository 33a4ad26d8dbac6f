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

//! Offline metadata service.
//!
//! Serves the EDMX document from a file and entity metadata from
//! `<logicalname>.json` files of a directory. A missing entity file is
//! answered with no records, which makes the model report the entity
//! as unknown.

use dataverse_gen_core::metadata::RetrieveMetadataChangesResponse;
use dataverse_gen_core::EntityLogicalName;
use dataverse_gen_core::MetadataService;
use log::debug;
use serde_json::from_str as json_from_str;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::read_to_string;
use std::io::Error as IoError;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug)]
pub enum FileServiceError {
    Io(PathBuf, IoError),
    Json(PathBuf, JsonError),
}

impl Display for FileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(path, err) => write!(f, "cannot read {}: {err}", path.display()),
            Self::Json(path, err) => {
                write!(f, "invalid metadata file {}: {err}", path.display())
            }
        }
    }
}

impl StdError for FileServiceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Json(_, err) => Some(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadataService {
    edmx: PathBuf,
    metadata_dir: PathBuf,
}

impl FileMetadataService {
    #[must_use]
    pub fn new(edmx: impl Into<PathBuf>, metadata_dir: impl Into<PathBuf>) -> Self {
        Self {
            edmx: edmx.into(),
            metadata_dir: metadata_dir.into(),
        }
    }

    fn entity_file(&self, logical_name: &EntityLogicalName) -> PathBuf {
        self.metadata_dir.join(format!("{logical_name}.json"))
    }
}

impl MetadataService for FileMetadataService {
    type Error = FileServiceError;

    async fn get_edmx_metadata(&self, _use_cache: bool) -> Result<String, Self::Error> {
        read_to_string(&self.edmx).map_err(|err| FileServiceError::Io(self.edmx.clone(), err))
    }

    async fn get_entity_metadata(
        &self,
        logical_name: &EntityLogicalName,
    ) -> Result<RetrieveMetadataChangesResponse, Self::Error> {
        let path = self.entity_file(logical_name);
        match read_to_string(&path) {
            Ok(content) => {
                json_from_str(&content).map_err(|err| FileServiceError::Json(path, err))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{}: no metadata file", path.display());
                Ok(RetrieveMetadataChangesResponse::default())
            }
            Err(err) => Err(FileServiceError::Io(path, err)),
        }
    }
}
