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

//! Expectations for the metadata service mock.

use dataverse_gen_core::EntityLogicalName;
use serde_json::from_str;
use serde_json::json;
use serde_json::Value as JsonValue;
use std::fmt::Display;

pub type Response<E> = Result<JsonValue, E>;

/// Request expected by the service.
#[derive(Debug, PartialEq)]
pub enum ExpectedRequest {
    /// Expected EDMX document request.
    Edmx,
    /// Expected entity metadata request.
    Entity { logical_name: EntityLogicalName },
}

/// Expectation for the tests.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: ExpectedRequest,
    pub response: Response<E>,
}

impl<E> Expect<E> {
    /// EDMX request answered with `document`.
    pub fn edmx(document: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Edmx,
            response: Ok(JsonValue::String(document.to_string())),
        }
    }

    /// Entity metadata request answered with `response` JSON.
    pub fn entity(logical_name: impl Display, response: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Entity {
                logical_name: logical_name.to_string().into(),
            },
            response: Ok(from_str(&response.to_string()).expect("invalid json")),
        }
    }

    /// Entity metadata request answered with no records.
    pub fn entity_not_found(logical_name: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Entity {
                logical_name: logical_name.to_string().into(),
            },
            response: Ok(json!({ "EntityMetadata": [] })),
        }
    }

    /// Entity metadata request that fails with `err`.
    pub fn entity_error(logical_name: impl Display, err: E) -> Self {
        Expect {
            request: ExpectedRequest::Entity {
                logical_name: logical_name.to_string().into(),
            },
            response: Err(err),
        }
    }
}
