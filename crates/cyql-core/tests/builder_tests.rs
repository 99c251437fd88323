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

//! End-to-end statement scenarios.

use cyql_core::{
    properties, BuiltQuery, CypherValue, DiagnosticSink, Diagnostics, Direction, NodeSelector,
    Params, QueryBuilder, RelationshipAttributes,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    previews: Mutex<Vec<BuiltQuery>>,
    suppressed: Mutex<Vec<String>>,
}

impl DiagnosticSink for RecordingSink {
    fn inspect(&self, query: &BuiltQuery) {
        self.previews.lock().unwrap().push(query.clone());
    }

    fn suppressed(&self, reason: &str) {
        self.suppressed.lock().unwrap().push(reason.to_string());
    }
}

#[test]
fn test_select_car_by_id() {
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), Some(&properties([("id", 1)])))
        .custom_return(["car"]);

    let built = builder.build();
    assert_eq!(built.query, "MATCH (car:Car {id: $car_id}) RETURN car");
    assert_eq!(
        built.params,
        Params::from([("car_id".to_string(), CypherValue::Int(1))])
    );
}

#[test]
fn test_relationship_between_known_aliases() {
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
}

#[test]
fn test_relationship_with_generated_endpoints() {
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
fn test_bare_relationship_registers_nothing() {
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), None)
        .select("Property", Some("prop"), None)
        .join("car", "prop", Direction::default(), &RelationshipAttributes::new());

    let built = builder.build();
    assert_eq!(
        built.query,
        "MATCH (car:Car) MATCH (prop:Property) MATCH (car)--(prop) RETURN car,prop"
    );
    assert_eq!(builder.aliases().count(), 2);
}

#[test]
fn test_default_return_with_generated_alias() {
    let mut builder = QueryBuilder::new();
    builder.select("TestLabel", None, None);
    assert_eq!(builder.build().query, "MATCH (a:TestLabel) RETURN a");
}

#[test]
fn test_default_return_keeps_relationship_aliases() {
    let mut builder = QueryBuilder::new();
    builder
        .select("Driver", Some("d"), Some(&properties([("name", "Max")])))
        .select("Track", Some("t"), None)
        .join(
            "d",
            "t",
            Direction::From,
            &RelationshipAttributes::new()
                .with_alias("r")
                .with_label("RACES_AT"),
        );

    let built = builder.build();
    assert_eq!(
        built.query,
        "MATCH (d:Driver {name: $d_name}) MATCH (t:Track) \
         MATCH (d)-[r:RACES_AT]->(t) RETURN d,t,r"
    );
    assert_eq!(built.params["d_name"], CypherValue::from("Max"));
}

#[test]
fn test_merge_then_match_then_join() {
    let mut builder = QueryBuilder::new();
    builder
        .create_node(
            "User",
            Some(&properties([("email", "ada@example.com")])),
            Some("u"),
        )
        .select("Team", Some("t"), Some(&properties([("slug", "core")])))
        .join(
            "u",
            "t",
            Direction::To,
            &RelationshipAttributes::new()
                .with_alias("m")
                .with_label("HAS_MEMBER")
                .with_properties(properties([("since", 2020)])),
        )
        .custom_return(["u", "t"]);

    let built = builder.build();
    assert_eq!(
        built.query,
        "MERGE (u:User {email: $u_email}) MATCH (t:Team {slug: $t_slug}) \
         MATCH (u)<-[m:HAS_MEMBER {since: $m_since}]-(t) RETURN u,t"
    );
    assert_eq!(built.params.len(), 3);
    assert_eq!(
        built.render_inline(),
        "MERGE (u:User {email: 'ada@example.com'}) MATCH (t:Team {slug: 'core'}) \
         MATCH (u)<-[m:HAS_MEMBER {since: 2020}]-(t) RETURN u,t"
    );
}

#[test]
fn test_same_alias_twice_is_suffixed_once() {
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), None)
        .select("Car", Some("car"), None);
    let names: Vec<&str> = builder.aliases().map(|e| e.alias.as_str()).collect();
    assert_eq!(names, ["car", "car_1"]);
}

#[test]
fn test_relationship_alias_collision_detected_later() {
    let mut builder = QueryBuilder::new();
    builder
        .select("A", Some("x"), None)
        .select("B", Some("y"), None)
        .join(
            "x",
            "y",
            Direction::Both,
            &RelationshipAttributes::new().with_alias("r").with_label("T"),
        )
        .select("C", Some("r"), None);
    assert_eq!(
        builder.build().query,
        "MATCH (x:A) MATCH (y:B) MATCH (x)-[r:T]-(y) MATCH (r_1:C) RETURN x,y,r,r_1"
    );
}

#[test]
fn test_build_twice_equal() {
    let mut builder = QueryBuilder::new();
    builder.select("Car", Some("car"), Some(&properties([("id", 1)])));
    assert_eq!(builder.build(), builder.build());
}

#[test]
fn test_peek_in_development_reports_current_statement() {
    let sink = Arc::new(RecordingSink::default());
    let diagnostics = Diagnostics::new(false, sink.clone());

    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), None)
        .peek(&diagnostics)
        .select("Property", Some("prop"), None);

    let previews = sink.previews.lock().unwrap();
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].query, "MATCH (car:Car) RETURN car");
    assert!(sink.suppressed.lock().unwrap().is_empty());
    assert_eq!(
        builder.build().query,
        "MATCH (car:Car) MATCH (prop:Property) RETURN car,prop"
    );
}

#[test]
fn test_peek_in_production_is_suppressed() {
    let sink = Arc::new(RecordingSink::default());
    let diagnostics = Diagnostics::new(true, sink.clone());

    let mut builder = QueryBuilder::new();
    builder.select("Car", Some("car"), None).peek(&diagnostics);

    assert!(sink.previews.lock().unwrap().is_empty());
    assert_eq!(sink.suppressed.lock().unwrap().len(), 1);
}

#[test]
fn test_built_query_serializes_as_query_and_params() {
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), Some(&properties([("id", 1)])))
        .custom_return(["car"]);
    let json = serde_json::to_value(builder.build()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "query": "MATCH (car:Car {id: $car_id}) RETURN car",
            "params": {"car_id": 1}
        })
    );
}
