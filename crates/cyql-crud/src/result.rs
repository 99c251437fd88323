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

//! Tabular results as returned by an executor.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A value in a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<GraphValue>),
    /// Map value.
    Map(BTreeMap<String, GraphValue>),
    /// A node with its identity and labels.
    Node {
        /// Database identity.
        identity: i64,
        /// Node labels.
        labels: Vec<String>,
        /// Node properties.
        properties: BTreeMap<String, GraphValue>,
    },
    /// A relationship with its identity, type and endpoints.
    Relationship {
        /// Database identity.
        identity: i64,
        /// Relationship type.
        rel_type: String,
        /// Identity of the start node.
        start: i64,
        /// Identity of the end node.
        end: i64,
        /// Relationship properties.
        properties: BTreeMap<String, GraphValue>,
    },
    /// Zoned date-time.
    DateTime(DateTime<FixedOffset>),
    /// Date-time without zone.
    LocalDateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
}

impl GraphValue {
    /// Build a node value.
    pub fn node<I, L, P, K>(identity: i64, labels: I, properties: P) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
        P: IntoIterator<Item = (K, GraphValue)>,
        K: Into<String>,
    {
        GraphValue::Node {
            identity,
            labels: labels.into_iter().map(Into::into).collect(),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Whether this value is a node or relationship.
    pub fn is_entity(&self) -> bool {
        matches!(self, GraphValue::Node { .. } | GraphValue::Relationship { .. })
    }

    /// Try to get as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            GraphValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<i64> for GraphValue {
    fn from(v: i64) -> Self {
        GraphValue::Int(v)
    }
}

impl From<&str> for GraphValue {
    fn from(v: &str) -> Self {
        GraphValue::String(v.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(v: String) -> Self {
        GraphValue::String(v)
    }
}

impl From<bool> for GraphValue {
    fn from(v: bool) -> Self {
        GraphValue::Bool(v)
    }
}

impl From<f64> for GraphValue {
    fn from(v: f64) -> Self {
        GraphValue::Float(v)
    }
}

/// One result row: column name → value, in column order.
pub type Row = IndexMap<String, GraphValue>;

/// Rows returned by a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// The rows, in the order the database returned them.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row.
    pub fn with_row<R, K>(mut self, row: R) -> Self
    where
        R: IntoIterator<Item = (K, GraphValue)>,
        K: Into<String>,
    {
        self.rows
            .push(row.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Column names of the first row.
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
