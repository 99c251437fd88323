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

//! Diagnostic output for statements under construction.
//!
//! [`QueryBuilder::peek`](crate::QueryBuilder::peek) hands the current
//! statement to a [`DiagnosticSink`]. Whether the caller runs in production
//! is passed in explicitly through [`Diagnostics`]; nothing here reads
//! process-wide state.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::builder::BuiltQuery;

/// Receives statement previews from `peek`.
pub trait DiagnosticSink: Send + Sync {
    /// Called with the current statement outside production.
    fn inspect(&self, query: &BuiltQuery);

    /// Called instead of [`inspect`](Self::inspect) in production.
    fn suppressed(&self, reason: &str);
}

/// Sink that writes previews to `tracing` under the `cyql::peek` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn inspect(&self, query: &BuiltQuery) {
        debug!(
            target: "cyql::peek",
            query = %query.query,
            params = ?query.params,
            "statement preview"
        );
    }

    fn suppressed(&self, reason: &str) {
        warn!(target: "cyql::peek", reason = reason, "statement preview suppressed");
    }
}

/// Where `peek` output goes, and whether it is allowed at all.
#[derive(Clone)]
pub struct Diagnostics {
    production: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    /// Diagnostics writing to `sink`.
    pub fn new(production: bool, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { production, sink }
    }

    /// Development diagnostics writing to [`TracingSink`].
    pub fn development() -> Self {
        Self::new(false, Arc::new(TracingSink))
    }

    /// Production diagnostics: every `peek` is reported as suppressed.
    pub fn production() -> Self {
        Self::new(true, Arc::new(TracingSink))
    }

    /// Replace the sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Whether this is a production context.
    pub fn is_production(&self) -> bool {
        self.production
    }

    pub(crate) fn emit(&self, query: impl FnOnce() -> BuiltQuery) {
        if self.production {
            self.sink
                .suppressed("statement previews are disabled in production");
        } else {
            self.sink.inspect(&query());
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::development()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("production", &self.production)
            .finish_non_exhaustive()
    }
}
