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

//! Example assembling a few statements with the query builder.

use cyql_core::{properties, Direction, NodeSelector, QueryBuilder, RelationshipAttributes};

fn main() {
    println!("=== Query Builder Examples ===\n");

    // Example 1: Match one node by id
    println!("1. Match a node:");
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), Some(&properties([("id", 1)])))
        .custom_return(["car"]);
    let built = builder.build();
    println!("   query:  {}", built.query);
    println!("   params: {:?}", built.params);
    println!();

    // Example 2: Two nodes and the relationship between them
    println!("2. Join two nodes:");
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
    println!("   query:  {}", builder.build().query);
    println!();

    // Example 3: Idempotent creation
    println!("3. Merge a node:");
    let mut builder = QueryBuilder::new();
    builder.create_node("User", Some(&properties([("email", "ada@example.com")])), None);
    println!("   inline: {}", builder.build().render_inline());
    println!();

    // Example 4: Generated aliases and suffixing
    println!("4. Alias handling:");
    let mut builder = QueryBuilder::new();
    builder
        .select("Car", Some("car"), None)
        .select("Car", Some("car"), None)
        .select("Car", None, None);
    let pattern = builder.relationship_reference(
        &NodeSelector::new(),
        &NodeSelector::new(),
        Direction::None,
        &RelationshipAttributes::new(),
    );
    println!("   query:   {}", builder.build().query);
    println!("   pattern: {}", pattern);
}
