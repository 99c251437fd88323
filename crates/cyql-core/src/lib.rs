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

//! Incremental builder for parameterized Cypher statements.
//!
//! A [`QueryBuilder`] collects node matches, node merges and relationship
//! matches, hands out collision-free aliases, and binds every property value
//! as a parameter. [`QueryBuilder::build`] returns the statement text and
//! its parameter bag, ready for any driver.
//!
//! # Generated Cypher
//!
//! | Call | Clause |
//! |------|--------|
//! | `select("Car", Some("car"), Some(&{id: 1}))` | `MATCH (car:Car {id: $car_id})` |
//! | `create_node("Car", Some(&{id: 1}), Some("car"))` | `MERGE (car:Car {id: $car_id})` |
//! | `join("car", "prop", Direction::From, &[r:RACES_AT])` | `MATCH (car)-[r:RACES_AT]->(prop)` |
//! | `custom_return(["car"])` | `RETURN car` |
//!
//! Parameter keys are `<alias>_<property>`, with every character outside
//! `[A-Za-z0-9]` in the property name replaced by `_`.
//!
//! # Example
//!
//! ```rust
//! use cyql_core::{properties, CypherValue, QueryBuilder};
//!
//! let mut builder = QueryBuilder::new();
//! builder
//!     .select("Car", Some("car"), Some(&properties([("id", 1)])))
//!     .custom_return(["car"]);
//!
//! let built = builder.build();
//! assert_eq!(built.query, "MATCH (car:Car {id: $car_id}) RETURN car");
//! assert_eq!(built.params["car_id"], CypherValue::Int(1));
//! ```
//!
//! # Validation
//!
//! None. Labels, aliases and raw clauses are emitted as given; the database
//! reports anything malformed when the statement runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod builder;
pub mod diagnostics;
pub mod ident;
pub mod params;
pub mod pattern;
pub mod value;

pub use builder::{BuiltQuery, QueryBuilder};
pub use diagnostics::{DiagnosticSink, Diagnostics, TracingSink};
pub use ident::{AliasEntry, AliasTable, IdentifierGenerator};
pub use params::{inline_properties, parameter_key, sanitize_parameter_name};
pub use pattern::{Direction, NodeSelector, RelationshipAttributes};
pub use value::{properties, CypherValue, Params, Properties};
