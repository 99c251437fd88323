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

//! Mapping result rows onto plain records.
//!
//! Nodes and relationships become [`Record`]s that carry their identity and
//! labels next to their properties. Scalar columns become single-field
//! records named after the column.
//!
//! Temporal values stored under one of the configured timestamp fields are
//! rendered as UTC RFC 3339 with millisecond precision
//! (`2024-05-01T10:00:00.000Z`); a bare date counts as midnight UTC. Other
//! temporal values keep their ISO-8601 form.

use chrono::{NaiveDateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::config::CrudConfig;
use crate::error::Result;
use crate::result::{GraphValue, QueryResult, Row};

/// A flattened node, relationship or scalar column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Database identity, for nodes and relationships.
    pub identity: Option<i64>,
    /// Node labels, or the relationship type.
    pub labels: Vec<String>,
    /// Start and end node identities, for relationships.
    pub endpoints: Option<(i64, i64)>,
    /// Properties, as JSON.
    pub fields: Map<String, Value>,
}

impl Record {
    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Fields plus identity and labels under the configured names.
    pub fn to_json(&self, config: &CrudConfig) -> Value {
        let mut object = self.fields.clone();
        if let Some(identity) = self.identity {
            object.insert(config.identity_field.clone(), Value::from(identity));
        }
        if !self.labels.is_empty() {
            object.insert(
                config.labels_field.clone(),
                Value::Array(self.labels.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(object)
    }

    /// Deserialize [`to_json`](Self::to_json) into `T`.
    pub fn to_typed<T: DeserializeOwned>(&self, config: &CrudConfig) -> Result<T> {
        Ok(serde_json::from_value(self.to_json(config))?)
    }
}

/// The records of one row, keyed by column in column order.
pub type RowRecords = IndexMap<String, Record>;

/// Map every row of `result`.
pub fn map_rows(result: &QueryResult, config: &CrudConfig) -> Vec<RowRecords> {
    result.rows.iter().map(|row| map_row(row, config)).collect()
}

/// Map one row.
pub fn map_row(row: &Row, config: &CrudConfig) -> RowRecords {
    row.iter()
        .map(|(column, value)| (column.clone(), to_record(column, value, config)))
        .collect()
}

/// The records of column `column` across `rows`, skipping rows without it.
pub fn records_for(rows: &[RowRecords], column: &str) -> Vec<Record> {
    rows.iter()
        .filter_map(|row| row.get(column).cloned())
        .collect()
}

fn to_record(column: &str, value: &GraphValue, config: &CrudConfig) -> Record {
    match value {
        GraphValue::Node {
            identity,
            labels,
            properties,
        } => Record {
            identity: Some(*identity),
            labels: labels.clone(),
            endpoints: None,
            fields: properties_to_json(properties, config),
        },
        GraphValue::Relationship {
            identity,
            rel_type,
            start,
            end,
            properties,
        } => Record {
            identity: Some(*identity),
            labels: vec![rel_type.clone()],
            endpoints: Some((*start, *end)),
            fields: properties_to_json(properties, config),
        },
        scalar => {
            let mut fields = Map::new();
            fields.insert(column.to_string(), to_json(scalar, Some(column), config));
            Record {
                fields,
                ..Record::default()
            }
        }
    }
}

fn properties_to_json(
    properties: &BTreeMap<String, GraphValue>,
    config: &CrudConfig,
) -> Map<String, Value> {
    properties
        .iter()
        .map(|(name, value)| (name.clone(), to_json(value, Some(name), config)))
        .collect()
}

/// Convert a value to JSON; `field` decides timestamp normalization.
fn to_json(value: &GraphValue, field: Option<&str>, config: &CrudConfig) -> Value {
    let canonical = field.is_some_and(|f| config.is_timestamp_field(f));
    match value {
        GraphValue::Null => Value::Null,
        GraphValue::Bool(b) => Value::Bool(*b),
        GraphValue::Int(i) => Value::from(*i),
        GraphValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        GraphValue::String(s) => Value::String(s.clone()),
        GraphValue::List(items) => {
            Value::Array(items.iter().map(|v| to_json(v, field, config)).collect())
        }
        GraphValue::Map(map) => Value::Object(properties_to_json(map, config)),
        entity @ (GraphValue::Node { .. } | GraphValue::Relationship { .. }) => {
            to_record("", entity, config).to_json(config)
        }
        GraphValue::DateTime(dt) => Value::String(if canonical {
            dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
        } else {
            dt.to_rfc3339()
        }),
        GraphValue::LocalDateTime(ndt) => Value::String(if canonical {
            canonical_naive(ndt)
        } else {
            ndt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
        }),
        GraphValue::Date(date) => Value::String(match date.and_hms_opt(0, 0, 0) {
            Some(midnight) if canonical => canonical_naive(&midnight),
            _ => date.format("%Y-%m-%d").to_string(),
        }),
    }
}

// Zone-less values are taken as UTC.
fn canonical_naive(ndt: &NaiveDateTime) -> String {
    Utc.from_utc_datetime(ndt)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
