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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

const COLLECTION_PREFIX: &str = "Collection(";
const COLLECTION_SUFFIX: &str = ")";

/// Type reference as written in a `Type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef<'a> {
    One(&'a str),
    CollectionOf(&'a str),
}

impl<'a> TypeRef<'a> {
    /// Parse type reference. Never fails: anything that is not wrapped
    /// into `Collection(...)` is a single type.
    #[must_use]
    pub fn parse(s: &'a str) -> Self {
        s.strip_prefix(COLLECTION_PREFIX).map_or(Self::One(s), |inner| {
            Self::CollectionOf(inner.strip_suffix(COLLECTION_SUFFIX).unwrap_or(inner))
        })
    }

    /// Type name without the collection wrapper.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        match self {
            Self::One(v) | Self::CollectionOf(v) => *v,
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::CollectionOf(_))
    }

    /// Last dot-separated segment of the type name.
    #[must_use]
    pub fn short_name(&self) -> &'a str {
        short_name(self.name())
    }
}

impl Display for TypeRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::One(v) => v.fmt(f),
            Self::CollectionOf(v) => write!(f, "{COLLECTION_PREFIX}{v}{COLLECTION_SUFFIX}"),
        }
    }
}

/// Last dot-separated segment of `name` (`mscrm.account` -> `account`).
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Type name with the `Collection(...)` wrapper removed.
#[must_use]
pub fn strip_collection(s: &str) -> &str {
    TypeRef::parse(s).name()
}
