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

//! CRUD operations expressed through the statement builder.

use std::sync::Arc;

use cyql_core::{
    parameter_key, CypherValue, Diagnostics, Direction, NodeSelector, Properties, QueryBuilder,
    RelationshipAttributes, TracingSink,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::CrudConfig;
use crate::error::{CrudError, Result};
use crate::executor::{Executor, RunOptions};
use crate::record::{map_rows, records_for, Record, RowRecords};
use crate::result::QueryResult;

/// CRUD façade over an [`Executor`].
///
/// Every operation assembles its statement with a fresh [`QueryBuilder`],
/// runs it with the repository's [`RunOptions`] and maps the rows into
/// [`Record`]s.
pub struct Repository<E: ?Sized> {
    executor: Arc<E>,
    config: CrudConfig,
    options: RunOptions,
    diagnostics: Diagnostics,
}

impl<E: ?Sized> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: self.config.clone(),
            options: self.options.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

impl<E: Executor + ?Sized> Repository<E> {
    /// Create a repository over a shared executor.
    pub fn new(executor: Arc<E>, config: CrudConfig) -> Self {
        let diagnostics = Diagnostics::new(config.production, Arc::new(TracingSink));
        Self {
            executor,
            config,
            options: RunOptions::default(),
            diagnostics,
        }
    }

    /// Replace the diagnostics used when statement tracing is on.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// A copy of this repository that runs with `options`.
    pub fn scoped(&self, options: RunOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// The repository's configuration.
    pub fn config(&self) -> &CrudConfig {
        &self.config
    }

    /// The options statements run with.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Build and run the statement in `builder`.
    pub async fn execute(&self, builder: &mut QueryBuilder) -> Result<QueryResult> {
        if self.config.trace_statements {
            builder.peek(&self.diagnostics);
        }
        let built = builder.build();

        debug!(
            target: "cyql::crud",
            query = %built.query,
            params = built.params.len(),
            session = ?self.options.session,
            transaction = ?self.options.transaction,
            "running statement"
        );

        let result = self
            .executor
            .run(&built.query, &built.params, &self.options)
            .await
            .map_err(|source| CrudError::Execution {
                query: built.query.clone(),
                source,
            })?;

        debug!(target: "cyql::crud", rows = result.len(), "statement returned");
        Ok(result)
    }

    /// `MATCH (n:Label {filter}) RETURN n`.
    pub async fn find(&self, label: &str, filter: &Properties) -> Result<Vec<Record>> {
        let n = self.config.node_alias.as_str();
        let mut builder = QueryBuilder::new();
        builder.select(label, Some(n), Some(filter)).custom_return([n]);
        self.fetch_column(&mut builder, n).await
    }

    /// First match of [`find`](Self::find), if any.
    pub async fn find_one(&self, label: &str, filter: &Properties) -> Result<Option<Record>> {
        Ok(self.find(label, filter).await?.into_iter().next())
    }

    /// First match of [`find`](Self::find), or [`CrudError::NotFound`].
    pub async fn get(&self, label: &str, filter: &Properties) -> Result<Record> {
        self.find_one(label, filter)
            .await?
            .ok_or_else(|| CrudError::NotFound {
                label: label.to_string(),
            })
    }

    /// [`find`](Self::find), deserializing each record into `T`.
    pub async fn find_as<T: DeserializeOwned>(
        &self,
        label: &str,
        filter: &Properties,
    ) -> Result<Vec<T>> {
        self.find(label, filter)
            .await?
            .iter()
            .map(|record| record.to_typed(&self.config))
            .collect()
    }

    /// `MERGE (n:Label {properties}) RETURN n`.
    ///
    /// An identical existing node is returned instead of duplicated.
    pub async fn create(&self, label: &str, properties: &Properties) -> Result<Record> {
        let n = self.config.node_alias.as_str();
        let mut builder = QueryBuilder::new();
        builder
            .create_node(label, Some(properties), Some(n))
            .custom_return([n]);
        self.fetch_first(&mut builder, n).await
    }

    /// `MATCH (n:Label {filter}) SET n += $n_changes RETURN n`.
    ///
    /// The changes map moves to `$n_changes_1` (and up) when a filter
    /// property already claimed `$n_changes`.
    pub async fn update(
        &self,
        label: &str,
        filter: &Properties,
        changes: &Properties,
    ) -> Result<Vec<Record>> {
        let n = self.config.node_alias.as_str();
        let mut builder = QueryBuilder::new();
        builder.select(label, Some(n), Some(filter));
        self.set_changes(&mut builder, n, changes);
        builder.custom_return([n]);
        self.fetch_column(&mut builder, n).await
    }

    /// `MERGE (n:Label {keys}) SET n += $n_changes RETURN n`.
    pub async fn upsert(
        &self,
        label: &str,
        keys: &Properties,
        changes: &Properties,
    ) -> Result<Record> {
        let n = self.config.node_alias.as_str();
        let mut builder = QueryBuilder::new();
        builder.create_node(label, Some(keys), Some(n));
        self.set_changes(&mut builder, n, changes);
        builder.custom_return([n]);
        self.fetch_first(&mut builder, n).await
    }

    /// `MATCH (n:Label {filter}) DETACH DELETE n`, returning how many nodes went.
    pub async fn delete(&self, label: &str, filter: &Properties) -> Result<u64> {
        let n = self.config.node_alias.as_str();
        let mut builder = QueryBuilder::new();
        builder
            .select(label, Some(n), Some(filter))
            .clause(format!("DETACH DELETE {}", n))
            .custom_return([format!("count({}) AS deleted", n)]);

        let result = self.execute(&mut builder).await?;
        let deleted = result
            .rows
            .first()
            .and_then(|row| row.get("deleted"))
            .and_then(|value| value.as_int())
            .ok_or_else(|| CrudError::UnexpectedShape("missing 'deleted' count".to_string()))?;
        u64::try_from(deleted)
            .map_err(|_| CrudError::UnexpectedShape(format!("negative delete count {}", deleted)))
    }

    /// Match two nodes and the relationship between them.
    ///
    /// Returns one [`RowRecords`] per match, keyed by the source, target
    /// and (when it has a type or alias) relationship aliases.
    pub async fn join(
        &self,
        source: &NodeSelector,
        target: &NodeSelector,
        direction: Direction,
        attributes: &RelationshipAttributes,
    ) -> Result<Vec<RowRecords>> {
        let mut builder = QueryBuilder::new();
        let (s, t) = self.select_endpoints(&mut builder, source, target);
        let attributes = self.named_relationship(attributes);
        builder.join(&s, &t, direction, &attributes);

        let result = self.execute(&mut builder).await?;
        Ok(map_rows(&result, &self.config))
    }

    /// Match two nodes and `MERGE` a relationship between them.
    ///
    /// Returns the relationship, or [`CrudError::NotFound`] when either
    /// endpoint did not match.
    pub async fn connect(
        &self,
        source: &NodeSelector,
        target: &NodeSelector,
        direction: Direction,
        attributes: &RelationshipAttributes,
    ) -> Result<Record> {
        let mut builder = QueryBuilder::new();
        let (s, t) = self.select_endpoints(&mut builder, source, target);
        let mut attributes = attributes.clone();
        if attributes.alias.is_none() {
            attributes.alias = Some(self.config.relationship_alias.clone());
        }
        let pattern = builder.relationship_reference(
            &NodeSelector::alias(s.as_str()),
            &NodeSelector::alias(t.as_str()),
            direction,
            &attributes,
        );
        // The relationship is registered last.
        let r = builder
            .aliases()
            .last()
            .map(|entry| entry.alias.clone())
            .unwrap_or_default();
        builder.clause(format!("MERGE {}", pattern)).custom_return([r.as_str()]);

        let rows = map_rows(&self.execute(&mut builder).await?, &self.config);
        records_for(&rows, &r)
            .into_iter()
            .next()
            .ok_or_else(|| CrudError::NotFound {
                label: attributes.label.unwrap_or_default(),
            })
    }

    fn select_endpoints(
        &self,
        builder: &mut QueryBuilder,
        source: &NodeSelector,
        target: &NodeSelector,
    ) -> (String, String) {
        let mut select = |selector: &NodeSelector, fallback: &str| {
            let requested = selector.alias.as_deref().unwrap_or(fallback);
            let alias = builder.resolve_alias(Some(requested));
            builder.select(
                selector.label.as_deref().unwrap_or(""),
                Some(&alias),
                Some(&selector.properties),
            );
            alias
        };
        let s = select(source, self.config.node_alias.as_str());
        let t = select(target, self.config.target_alias.as_str());
        (s, t)
    }

    // A typed but unnamed relationship gets the configured alias so it can
    // be returned.
    fn named_relationship(&self, attributes: &RelationshipAttributes) -> RelationshipAttributes {
        let mut attributes = attributes.clone();
        if attributes.alias.is_none() && attributes.label.is_some() {
            attributes.alias = Some(self.config.relationship_alias.clone());
        }
        attributes
    }

    /// Binds `changes` under a key no filter or key property already took.
    fn set_changes(&self, builder: &mut QueryBuilder, alias: &str, changes: &Properties) {
        let base = parameter_key(alias, "changes");
        let mut key = base.clone();
        let mut suffix = 1;
        while builder.params().contains_key(&key) {
            key = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        builder
            .clause(format!("SET {} += ${}", alias, key))
            .param(key, CypherValue::from(changes.clone()));
    }

    async fn fetch_column(&self, builder: &mut QueryBuilder, column: &str) -> Result<Vec<Record>> {
        let result = self.execute(builder).await?;
        let rows = map_rows(&result, &self.config);
        Ok(records_for(&rows, column))
    }

    async fn fetch_first(&self, builder: &mut QueryBuilder, column: &str) -> Result<Record> {
        self.fetch_column(builder, column)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CrudError::UnexpectedShape(format!("no '{}' column returned", column)))
    }
}
