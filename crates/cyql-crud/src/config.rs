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

//! Configuration for the repository and its record mapping.

use serde::{Deserialize, Serialize};

/// Field names treated as timestamps by default.
pub const DEFAULT_TIMESTAMP_FIELDS: &[&str] = &["createdAt", "updatedAt", "deletedAt"];

/// Configuration for [`Repository`](crate::Repository).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    /// Alias of the primary node in generated statements (default: "n").
    pub node_alias: String,

    /// Alias of the second node in join/connect statements (default: "m").
    pub target_alias: String,

    /// Alias of the relationship in join/connect statements (default: "r").
    pub relationship_alias: String,

    /// Record field carrying the database identity (default: "_id").
    pub identity_field: String,

    /// Record field carrying node labels (default: "labels").
    pub labels_field: String,

    /// Fields whose temporal values are normalized to UTC RFC 3339 strings.
    pub timestamp_fields: Vec<String>,

    /// Production context: statement previews are suppressed (default: false).
    pub production: bool,

    /// Preview every statement before it runs (default: false).
    pub trace_statements: bool,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            node_alias: "n".to_string(),
            target_alias: "m".to_string(),
            relationship_alias: "r".to_string(),
            identity_field: "_id".to_string(),
            labels_field: "labels".to_string(),
            timestamp_fields: DEFAULT_TIMESTAMP_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            production: false,
            trace_statements: false,
        }
    }
}

/// Builder for CrudConfig.
///
/// # Examples
///
/// ```
/// # use cyql_crud::CrudConfig;
/// let config = CrudConfig::builder()
///     .identity_field("id")
///     .production(true)
///     .build();
/// assert_eq!(config.identity_field, "id");
/// ```
#[derive(Default)]
pub struct CrudConfigBuilder {
    node_alias: Option<String>,
    target_alias: Option<String>,
    relationship_alias: Option<String>,
    identity_field: Option<String>,
    labels_field: Option<String>,
    timestamp_fields: Option<Vec<String>>,
    production: Option<bool>,
    trace_statements: Option<bool>,
}

impl CrudConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary node alias.
    pub fn node_alias(mut self, alias: impl Into<String>) -> Self {
        self.node_alias = Some(alias.into());
        self
    }

    /// Set the second node alias.
    pub fn target_alias(mut self, alias: impl Into<String>) -> Self {
        self.target_alias = Some(alias.into());
        self
    }

    /// Set the relationship alias.
    pub fn relationship_alias(mut self, alias: impl Into<String>) -> Self {
        self.relationship_alias = Some(alias.into());
        self
    }

    /// Set the identity field name.
    pub fn identity_field(mut self, name: impl Into<String>) -> Self {
        self.identity_field = Some(name.into());
        self
    }

    /// Set the labels field name.
    pub fn labels_field(mut self, name: impl Into<String>) -> Self {
        self.labels_field = Some(name.into());
        self
    }

    /// Set the timestamp field names.
    pub fn timestamp_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timestamp_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Mark this as a production context.
    pub fn production(mut self, production: bool) -> Self {
        self.production = Some(production);
        self
    }

    /// Preview every statement before it runs.
    pub fn trace_statements(mut self, trace: bool) -> Self {
        self.trace_statements = Some(trace);
        self
    }

    /// Build the CrudConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> CrudConfig {
        let defaults = CrudConfig::default();
        CrudConfig {
            node_alias: self.node_alias.unwrap_or(defaults.node_alias),
            target_alias: self.target_alias.unwrap_or(defaults.target_alias),
            relationship_alias: self.relationship_alias.unwrap_or(defaults.relationship_alias),
            identity_field: self.identity_field.unwrap_or(defaults.identity_field),
            labels_field: self.labels_field.unwrap_or(defaults.labels_field),
            timestamp_fields: self.timestamp_fields.unwrap_or(defaults.timestamp_fields),
            production: self.production.unwrap_or(defaults.production),
            trace_statements: self.trace_statements.unwrap_or(defaults.trace_statements),
        }
    }
}

impl CrudConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for CrudConfig.
    pub fn builder() -> CrudConfigBuilder {
        CrudConfigBuilder::default()
    }

    /// Set the identity field name.
    pub fn with_identity_field(mut self, name: impl Into<String>) -> Self {
        self.identity_field = name.into();
        self
    }

    /// Add a timestamp field name.
    pub fn with_timestamp_field(mut self, name: impl Into<String>) -> Self {
        self.timestamp_fields.push(name.into());
        self
    }

    /// Mark this as a production context.
    pub fn for_production(mut self) -> Self {
        self.production = true;
        self
    }

    /// Preview every statement before it runs.
    pub fn with_statement_tracing(mut self) -> Self {
        self.trace_statements = true;
        self
    }

    /// Whether `field` holds a timestamp.
    pub fn is_timestamp_field(&self, field: &str) -> bool {
        self.timestamp_fields.iter().any(|f| f == field)
    }
}
