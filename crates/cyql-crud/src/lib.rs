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

//! CRUD façade over a graph database, built on `cyql-core`.
//!
//! The crate turns "find nodes by filter", "create a node", "join two
//! nodes" and friends into builder calls, hands the resulting statement to
//! an [`Executor`], and maps the tabular result into [`Record`]s.
//!
//! | Operation | Statement |
//! |-----------|-----------|
//! | [`Repository::find`] | `MATCH (n:Label {..}) RETURN n` |
//! | [`Repository::create`] | `MERGE (n:Label {..}) RETURN n` |
//! | [`Repository::update`] | `MATCH (n:Label {..}) SET n += $n_changes RETURN n` |
//! | [`Repository::upsert`] | `MERGE (n:Label {..}) SET n += $n_changes RETURN n` |
//! | [`Repository::delete`] | `MATCH (n:Label {..}) DETACH DELETE n RETURN count(n) AS deleted` |
//! | [`Repository::join`] | `MATCH (n..) MATCH (m..) MATCH (n)-[r:TYPE]->(m) RETURN n,m,r` |
//! | [`Repository::connect`] | `MATCH (n..) MATCH (m..) MERGE (n)-[r:TYPE]->(m) RETURN r` |
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use cyql_core::{properties, Params};
//! use cyql_crud::{BoxError, CrudConfig, Executor, GraphValue, QueryResult, Repository, RunOptions};
//!
//! struct OneCar;
//!
//! #[async_trait]
//! impl Executor for OneCar {
//!     async fn run(
//!         &self,
//!         query: &str,
//!         _params: &Params,
//!         _options: &RunOptions,
//!     ) -> Result<QueryResult, BoxError> {
//!         assert_eq!(query, "MATCH (n:Car {id: $n_id}) RETURN n");
//!         Ok(QueryResult::new().with_row([(
//!             "n",
//!             GraphValue::node(1, ["Car"], [("id", GraphValue::Int(7))]),
//!         )]))
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo = Repository::new(Arc::new(OneCar), CrudConfig::default());
//! let cars = repo.find("Car", &properties([("id", 7)])).await?;
//! assert_eq!(cars[0].labels, ["Car"]);
//! # Ok::<(), cyql_crud::CrudError>(())
//! # }).unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod executor;
pub mod record;
pub mod repository;
pub mod result;

pub use config::{CrudConfig, CrudConfigBuilder, DEFAULT_TIMESTAMP_FIELDS};
pub use error::{BoxError, CrudError, Result};
pub use executor::{Executor, RunOptions};
pub use record::{map_row, map_rows, records_for, Record, RowRecords};
pub use repository::Repository;
pub use result::{GraphValue, QueryResult, Row};
