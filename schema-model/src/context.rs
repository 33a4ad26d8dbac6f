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

//! Mutable state shared by the passes of one model build.

use std::collections::HashSet;

/// Build context owned by a single `SchemaModel`.
///
/// Global option sets are shared between entities. The first entity
/// that uses one registers it; later registrations of the same name
/// refer to the existing enum.
#[derive(Debug, Default)]
pub struct SchemaBuildContext {
    global_option_sets: HashSet<String>,
}

impl SchemaBuildContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register global option set `name`. Returns `false` if it is
    /// already registered.
    pub fn register_global_option_set(&mut self, name: &str) -> bool {
        if self.global_option_sets.contains(name) {
            false
        } else {
            self.global_option_sets.insert(name.to_string())
        }
    }

    #[must_use]
    pub fn is_global_option_set(&self, name: &str) -> bool {
        self.global_option_sets.contains(name)
    }
}
