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

pub mod expect;

#[doc(inline)]
pub use expect::Expect;
pub use expect::ExpectedRequest;

use dataverse_gen_core::metadata::RetrieveMetadataChangesResponse;
use dataverse_gen_core::EntityLogicalName;
use dataverse_gen_core::MetadataService as CoreMetadataService;
use serde_json::from_value;
use serde_json::Error as JsonError;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    MutexLock(String),
    NothingIsExpected,
    BadResponseJson(JsonError),
    BadEdmxResponse,
    UnexpectedEdmx(ExpectedRequest),
    UnexpectedEntity(EntityLogicalName, ExpectedRequest),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {err}"),
            Self::MutexLock(err) => write!(f, "lock error: {err}"),
            Self::NothingIsExpected => {
                write!(f, "nothing is expected to happen but something happened")
            }
            Self::BadResponseJson(err) => write!(f, "bad json response: {err}"),
            Self::BadEdmxResponse => write!(f, "edmx response is not a string"),
            Self::UnexpectedEdmx(expected) => {
                write!(f, "unexpected edmx request; expected: {expected:?}")
            }
            Self::UnexpectedEntity(name, expected) => {
                write!(
                    f,
                    "unexpected entity metadata request: {name}; expected: {expected:?}"
                )
            }
        }
    }
}

impl StdError for Error {}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

/// Metadata service that answers from a queue of expectations.
///
/// Every call pops the front expectation and fails if it does not
/// match the request.
#[derive(Default)]
pub struct MetadataService<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
}

impl<E> MetadataService<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expect: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue an expectation after already queued ones.
    pub fn expect(&self, exp: Expect<E>) -> &Self {
        self.expect
            .lock()
            .expect("not poisoned")
            .push_back(exp);
        self
    }

    /// Number of expectations not consumed yet.
    pub fn pending(&self) -> usize {
        self.expect.lock().expect("not poisoned").len()
    }

    fn next_expect(&self) -> Result<Expect<E>, Error> {
        self.expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or(Error::NothingIsExpected)
    }
}

impl<E> CoreMetadataService for MetadataService<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn get_edmx_metadata(&self, _use_cache: bool) -> Result<String, Self::Error> {
        let expect = self.next_expect()?;
        match expect {
            Expect {
                request: ExpectedRequest::Edmx,
                response,
            } => match response.map_err(|err| Error::ErrorResponse(Box::new(err)))? {
                JsonValue::String(document) => Ok(document),
                _ => Err(Error::BadEdmxResponse),
            },
            _ => Err(Error::UnexpectedEdmx(expect.request)),
        }
    }

    async fn get_entity_metadata(
        &self,
        logical_name: &EntityLogicalName,
    ) -> Result<RetrieveMetadataChangesResponse, Self::Error> {
        let expect = self.next_expect()?;
        match expect {
            Expect {
                request: ExpectedRequest::Entity { logical_name: name },
                response,
            } if name == *logical_name => {
                let response = response.map_err(|err| Error::ErrorResponse(Box::new(err)))?;
                from_value(response).map_err(Error::BadResponseJson)
            }
            _ => Err(Error::UnexpectedEntity(
                logical_name.clone(),
                expect.request,
            )),
        }
    }
}
