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

//! The statement builder.
//!
//! A [`QueryBuilder`] accumulates clauses, aliases and parameters and turns
//! them into one statement on [`build`](QueryBuilder::build). It never
//! validates what it emits: labels, aliases and raw clauses pass through as
//! given, and the database rejects whatever is wrong at execution time.
//!
//! # Example
//!
//! ```
//! use cyql_core::{properties, Direction, QueryBuilder, RelationshipAttributes};
//!
//! let mut builder = QueryBuilder::new();
//! builder
//!     .select("Car", Some("car"), Some(&properties([("id", 1)])))
//!     .select("Property", Some("prop"), None)
//!     .join(
//!         "car",
//!         "prop",
//!         Direction::From,
//!         &RelationshipAttributes::new().with_label("RACES_AT"),
//!     )
//!     .custom_return(["car", "prop"]);
//!
//! let built = builder.build();
//! assert_eq!(
//!     built.query,
//!     "MATCH (car:Car {id: $car_id}) MATCH (prop:Property) \
//!      MATCH (car)-[a:RACES_AT]->(prop) RETURN car,prop"
//! );
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostics::Diagnostics;
use crate::ident::{AliasEntry, AliasTable, IdentifierGenerator};
use crate::params::inline_properties;
use crate::pattern::{compose_reference, Direction, NodeSelector, RelationshipAttributes};
use crate::value::{CypherValue, Params, Properties};

/// A finished statement and the parameters it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltQuery {
    /// Statement text.
    pub query: String,
    /// Parameter bag.
    pub params: Params,
}

impl BuiltQuery {
    /// Render the statement with every parameter inlined as a literal.
    ///
    /// Longer keys are substituted first so `$a_id` never clobbers
    /// `$a_id_2`. For previews only.
    pub fn render_inline(&self) -> String {
        let mut keys: Vec<&String> = self.params.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = self.query.clone();
        for key in keys {
            let placeholder = format!("${}", key);
            result = result.replace(&placeholder, &self.params[key].to_cypher_literal());
        }
        result
    }
}

/// Accumulates a graph statement from node and relationship declarations.
///
/// Every mutating method returns `&mut Self` for chaining. `build` only
/// reads, so the builder can be extended and built again.
///
/// Statements are assembled by one caller at a time; share the output, not
/// the builder.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    clauses: Vec<String>,
    aliases: AliasTable,
    params: Params,
    custom_return: Option<String>,
    generator: IdentifierGenerator,
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `MATCH (alias:Label {filter})` and register the alias.
    ///
    /// A missing alias is generated; a taken one is suffixed.
    pub fn select(
        &mut self,
        label: &str,
        alias: Option<&str>,
        filter: Option<&Properties>,
    ) -> &mut Self {
        let alias = self.resolve_alias(alias);
        self.aliases.register(alias.as_str(), label);
        let reference = self.node_reference(&alias, Some(label), filter);
        self.clauses.push(format!("MATCH ({})", reference));
        self
    }

    /// Append `MERGE (alias:Label {properties})` and register the alias.
    ///
    /// `MERGE` reuses a matching node instead of creating a duplicate.
    pub fn create_node(
        &mut self,
        label: &str,
        properties: Option<&Properties>,
        alias: Option<&str>,
    ) -> &mut Self {
        let alias = self.resolve_alias(alias);
        self.aliases.register(alias.as_str(), label);
        let reference = self.node_reference(&alias, Some(label), properties);
        self.clauses.push(format!("MERGE ({})", reference));
        self
    }

    /// Append `MATCH (source)<arrow>(target)` between two aliases.
    ///
    /// The aliases are expected to be registered already. This is not
    /// enforced: an unknown alias is emitted as a bare variable.
    pub fn join(
        &mut self,
        source: &str,
        target: &str,
        direction: Direction,
        attributes: &RelationshipAttributes,
    ) -> &mut Self {
        for alias in [source, target] {
            if !self.aliases.contains(alias) {
                debug!(
                    target: "cyql::builder",
                    alias = alias,
                    "join references an alias that is not registered"
                );
            }
        }
        let pattern = self.relationship_reference(
            &NodeSelector::alias(source),
            &NodeSelector::alias(target),
            direction,
            attributes,
        );
        self.clauses.push(format!("MATCH {}", pattern));
        self
    }

    /// Replace the default projection with `RETURN <items>`.
    ///
    /// Items are emitted verbatim, so expressions such as
    /// `count(n) AS deleted` work too. The last call wins.
    pub fn custom_return<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.custom_return = Some(format!("RETURN {}", items.join(",")));
        self
    }

    /// Append a raw clause, verbatim.
    pub fn clause(&mut self, clause: impl Into<String>) -> &mut Self {
        self.clauses.push(clause.into());
        self
    }

    /// Bind a parameter under `key`, verbatim.
    pub fn param(&mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> &mut Self {
        let key = key.into();
        self.merge_params(Params::from([(key, value.into())]));
        self
    }

    /// Serialize the accumulated statement.
    ///
    /// Clauses are joined by single spaces in commit order and followed by
    /// the custom projection or, failing that, `RETURN` with every
    /// registered alias (relationships included) in registration order.
    pub fn build(&self) -> BuiltQuery {
        let projection = match &self.custom_return {
            Some(custom) => custom.clone(),
            None => {
                let aliases: Vec<&str> = self.aliases.names().collect();
                format!("RETURN {}", aliases.join(","))
            }
        };

        let mut parts: Vec<&str> = self.clauses.iter().map(String::as_str).collect();
        parts.push(&projection);

        BuiltQuery {
            query: parts.join(" "),
            params: self.params.clone(),
        }
    }

    /// Report the current statement to `diagnostics` and carry on.
    ///
    /// In a production context the sink only hears that the preview was
    /// suppressed.
    pub fn peek(&mut self, diagnostics: &Diagnostics) -> &mut Self {
        diagnostics.emit(|| self.build());
        self
    }

    /// Build `alias[:Label][ {props}]` and bind its parameters.
    ///
    /// Does not register the alias.
    pub fn node_reference(
        &mut self,
        alias: &str,
        label: Option<&str>,
        properties: Option<&Properties>,
    ) -> String {
        let inline = match properties {
            Some(props) => {
                let (token, params) = inline_properties(alias, props);
                self.merge_params(params);
                token
            }
            None => String::new(),
        };
        compose_reference(alias, label, &inline)
    }

    /// Build `(source)<arrow>(target)`.
    ///
    /// Endpoints without an alias get a generated one, which is not
    /// registered. The relationship gets a `[alias[:Type][ {props}]]`
    /// segment only when it has an alias or a type; that alias is then
    /// resolved against, and registered in, the alias table.
    pub fn relationship_reference(
        &mut self,
        source: &NodeSelector,
        target: &NodeSelector,
        direction: Direction,
        attributes: &RelationshipAttributes,
    ) -> String {
        let source_ref = self.endpoint_reference(source);
        let target_ref = self.endpoint_reference(target);

        let bracket = if attributes.is_bracketed() {
            let alias = self.resolve_alias(attributes.alias.as_deref());
            self.aliases
                .register(alias.as_str(), attributes.label.as_deref().unwrap_or(""));
            let reference = self.node_reference(
                &alias,
                attributes.label.as_deref(),
                Some(&attributes.properties),
            );
            Some(format!("[{}]", reference))
        } else {
            None
        };

        format!(
            "({}){}({})",
            source_ref,
            direction.arrow(bracket.as_deref()),
            target_ref
        )
    }

    /// Next generated alias that is not registered.
    pub fn next_alias(&mut self) -> String {
        loop {
            let candidate = self.generator.next_identifier();
            if !self.aliases.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Resolve a requested alias: generate when missing, suffix when taken.
    ///
    /// The result is free at the time of return; register it before
    /// resolving another.
    pub fn resolve_alias(&mut self, requested: Option<&str>) -> String {
        match requested {
            Some(alias) => self.aliases.disambiguate(alias),
            None => self.next_alias(),
        }
    }

    /// Registered aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &AliasEntry> {
        self.aliases.iter()
    }

    /// Check whether `alias` is registered.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    /// Parameters bound so far.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Clauses committed so far.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    fn endpoint_reference(&mut self, selector: &NodeSelector) -> String {
        let alias = match &selector.alias {
            Some(alias) => alias.clone(),
            None => self.next_alias(),
        };
        self.node_reference(&alias, selector.label.as_deref(), Some(&selector.properties))
    }

    fn merge_params(&mut self, params: Params) {
        for (key, value) in params {
            match self.params.insert(key.clone(), value) {
                Some(previous) if self.params.get(&key) != Some(&previous) => {
                    warn!(
                        target: "cyql::builder",
                        key = %key,
                        "parameter overwritten by a later value"
                    );
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::properties;

    #[test]
    fn test_suffixed_alias_key_collision_keeps_later_value() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), Some(&properties([("1_id", 1)])))
            .select("Car", Some("car"), Some(&properties([("id", 2)])));
        let built = builder.build();
        assert_eq!(
            built.query,
            "MATCH (car:Car {1_id: $car_1_id}) MATCH (car_1:Car {id: $car_1_id}) RETURN car,car_1"
        );
        assert_eq!(built.params.len(), 1);
        assert_eq!(built.params["car_1_id"], CypherValue::Int(2));
    }

    #[test]
    fn test_select_with_custom_return() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), Some(&properties([("id", 1)])))
            .custom_return(["car"]);
        let built = builder.build();
        assert_eq!(built.query, "MATCH (car:Car {id: $car_id}) RETURN car");
        assert_eq!(built.params, Params::from([("car_id".to_string(), CypherValue::Int(1))]));
    }

    #[test]
    fn test_default_return_lists_all_aliases() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), None)
            .select("Property", Some("prop"), None);
        assert_eq!(
            builder.build().query,
            "MATCH (car:Car) MATCH (prop:Property) RETURN car,prop"
        );
    }

    #[test]
    fn test_select_generates_alias() {
        let mut builder = QueryBuilder::new();
        builder.select("TestLabel", None, None);
        assert_eq!(builder.build().query, "MATCH (a:TestLabel) RETURN a");
    }

    #[test]
    fn test_create_node_uses_merge() {
        let mut builder = QueryBuilder::new();
        builder.create_node("User", Some(&properties([("name", "Ada")])), Some("u"));
        let built = builder.build();
        assert_eq!(built.query, "MERGE (u:User {name: $u_name}) RETURN u");
        assert_eq!(built.params["u_name"], CypherValue::from("Ada"));
    }

    #[test]
    fn test_repeated_alias_is_suffixed() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), Some(&properties([("id", 1)])))
            .select("Car", Some("car"), Some(&properties([("id", 2)])));
        let built = builder.build();
        assert_eq!(
            built.query,
            "MATCH (car:Car {id: $car_id}) MATCH (car_1:Car {id: $car_1_id}) RETURN car,car_1"
        );
        assert_eq!(built.params.len(), 2);
    }

    #[test]
    fn test_relationship_reference_explicit_aliases() {
        let mut builder = QueryBuilder::new();
        let pattern = builder.relationship_reference(
            &NodeSelector::alias("car"),
            &NodeSelector::alias("prop"),
            Direction::From,
            &RelationshipAttributes::new()
                .with_label("RACES_AT")
                .with_alias("r"),
        );
        assert_eq!(pattern, "(car)-[r:RACES_AT]->(prop)");
        assert!(builder.params().is_empty());
        assert!(builder.contains_alias("r"));
    }

    #[test]
    fn test_relationship_reference_generates_endpoints() {
        let mut builder = QueryBuilder::new();
        let pattern = builder.relationship_reference(
            &NodeSelector::new(),
            &NodeSelector::new(),
            Direction::From,
            &RelationshipAttributes::new()
                .with_label("RACES_AT")
                .with_alias("r"),
        );
        assert_eq!(pattern, "(a)-[r:RACES_AT]->(b)");
    }

    #[test]
    fn test_relationship_reference_bare_arrow() {
        let mut builder = QueryBuilder::new();
        let pattern = builder.relationship_reference(
            &NodeSelector::alias("car"),
            &NodeSelector::alias("prop"),
            Direction::default(),
            &RelationshipAttributes::new(),
        );
        assert_eq!(pattern, "(car)--(prop)");
        assert_eq!(builder.aliases().count(), 0);
    }

    #[test]
    fn test_relationship_reference_directions() {
        let cases = [
            (Direction::From, "(x)-[r:T]->(y)"),
            (Direction::To, "(x)<-[r:T]-(y)"),
            (Direction::Both, "(x)-[r:T]-(y)"),
            (Direction::None, "(x)-[r:T]-(y)"),
        ];
        for (direction, expected) in cases {
            let mut builder = QueryBuilder::new();
            let pattern = builder.relationship_reference(
                &NodeSelector::alias("x"),
                &NodeSelector::alias("y"),
                direction,
                &RelationshipAttributes::new().with_alias("r").with_label("T"),
            );
            assert_eq!(pattern, expected);
        }
    }

    #[test]
    fn test_relationship_properties_and_endpoint_filters() {
        let mut builder = QueryBuilder::new();
        let pattern = builder.relationship_reference(
            &NodeSelector::alias("s")
                .with_label("Driver")
                .with_properties(properties([("name", "Max")])),
            &NodeSelector::alias("t").with_label("Track"),
            Direction::From,
            &RelationshipAttributes::new()
                .with_alias("r")
                .with_label("RACES_AT")
                .with_properties(properties([("year", 2024)])),
        );
        assert_eq!(
            pattern,
            "(s:Driver {name: $s_name})-[r:RACES_AT {year: $r_year}]->(t:Track)"
        );
        assert_eq!(builder.params().len(), 2);
    }

    #[test]
    fn test_label_only_relationship_gets_generated_alias() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), None)
            .select("Property", Some("prop"), None)
            .join(
                "car",
                "prop",
                Direction::From,
                &RelationshipAttributes::new().with_label("RACES_AT"),
            );
        let entry = builder.aliases().last().cloned();
        assert_eq!(
            entry,
            Some(AliasEntry {
                alias: "a".to_string(),
                label: "RACES_AT".to_string()
            })
        );
    }

    #[test]
    fn test_default_return_includes_relationship_alias() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), None)
            .select("Property", Some("prop"), None)
            .join(
                "car",
                "prop",
                Direction::From,
                &RelationshipAttributes::new()
                    .with_alias("r")
                    .with_label("RACES_AT"),
            );
        assert_eq!(
            builder.build().query,
            "MATCH (car:Car) MATCH (prop:Property) MATCH (car)-[r:RACES_AT]->(prop) RETURN car,prop,r"
        );
    }

    #[test]
    fn test_join_with_unregistered_alias_passes_through() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), None)
            .join("car", "ghost", Direction::To, &RelationshipAttributes::new());
        assert_eq!(
            builder.build().query,
            "MATCH (car:Car) MATCH (car)<--(ghost) RETURN car"
        );
    }

    #[test]
    fn test_generated_alias_skips_explicit_one() {
        let mut builder = QueryBuilder::new();
        builder.select("A", Some("a"), None).select("B", None, None);
        assert_eq!(builder.build().query, "MATCH (a:A) MATCH (b:B) RETURN a,b");
    }

    #[test]
    fn test_custom_return_last_call_wins() {
        let mut builder = QueryBuilder::new();
        builder
            .select("Car", Some("car"), None)
            .custom_return(["car", "x"])
            .custom_return(["count(car) AS total"]);
        assert_eq!(
            builder.build().query,
            "MATCH (car:Car) RETURN count(car) AS total"
        );
    }

    #[test]
    fn test_build_is_idempotent_and_reentrant() {
        let mut builder = QueryBuilder::new();
        builder.select("Car", Some("car"), Some(&properties([("id", 1)])));
        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        builder.select("Property", Some("prop"), None);
        let third = builder.build();
        assert_ne!(first, third);
        assert!(third.query.ends_with("RETURN car,prop"));
    }

    #[test]
    fn test_raw_clause_and_param() {
        let mut builder = QueryBuilder::new();
        builder
            .select("User", Some("n"), None)
            .clause("SET n += $n_changes")
            .param("n_changes", properties([("active", true)]))
            .custom_return(["n"]);
        let built = builder.build();
        assert_eq!(built.query, "MATCH (n:User) SET n += $n_changes RETURN n");
        assert!(matches!(built.params["n_changes"], CypherValue::Map(_)));
    }

    #[test]
    fn test_empty_builder_builds_bare_return() {
        let builder = QueryBuilder::new();
        assert_eq!(builder.build().query, "RETURN ");
    }

    #[test]
    fn test_render_inline_prefers_longer_keys() {
        let built = BuiltQuery {
            query: "MATCH (a {id: $a_id, x: $a_id_2})".to_string(),
            params: Params::from([
                ("a_id".to_string(), CypherValue::Int(1)),
                ("a_id_2".to_string(), CypherValue::Int(2)),
            ]),
        };
        assert_eq!(built.render_inline(), "MATCH (a {id: 1, x: 2})");
    }
}
