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

//! Error types for repository operations.

use thiserror::Error;

/// Boxed error returned by an [`Executor`](crate::Executor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The executor failed to run a statement.
    #[error("statement execution failed: {source}")]
    Execution {
        /// The statement that failed.
        query: String,
        /// The executor's error.
        #[source]
        source: BoxError,
    },

    /// A record could not be converted into the requested type.
    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),

    /// No node matched where one was required.
    #[error("no '{label}' node matched the filter")]
    NotFound {
        /// Label that was searched.
        label: String,
    },

    /// The result did not have the shape the operation expects.
    #[error("unexpected result shape: {0}")]
    UnexpectedShape(String),
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, CrudError>;
