// Dweve CYQL - Cypher Query Builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The statement-execution seam.

use async_trait::async_trait;
use cyql_core::Params;
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::result::QueryResult;

/// Session and transaction handles forwarded to the executor untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Session to run in.
    pub session: Option<String>,
    /// Transaction to run in.
    pub transaction: Option<String>,
}

impl RunOptions {
    /// No session, no transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run inside `session`.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Run inside `transaction`.
    pub fn with_transaction(mut self, transaction: impl Into<String>) -> Self {
        self.transaction = Some(transaction.into());
        self
    }
}

/// Runs statements against a graph database.
///
/// Implementations own connections, retries and timeouts.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `query` with `params`.
    async fn run(
        &self,
        query: &str,
        params: &Params,
        options: &RunOptions,
    ) -> Result<QueryResult, BoxError>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    async fn run(
        &self,
        query: &str,
        params: &Params,
        options: &RunOptions,
    ) -> Result<QueryResult, BoxError> {
        (**self).run(query, params, options).await
    }
}
