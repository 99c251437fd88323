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

//! Node and relationship pattern pieces.

use serde::{Deserialize, Serialize};

use crate::value::Properties;

/// Traversal orientation of a relationship, as seen from the source node.
///
/// `Both` and `None` emit the same undirected arrow; the distinction only
/// matters to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `(source)-[...]->(target)`.
    From,
    /// `(source)<-[...]-(target)`.
    To,
    /// `(source)-[...]-(target)`.
    Both,
    /// `(source)-[...]-(target)`.
    #[default]
    None,
}

impl Direction {
    /// Wrap an optional bracket segment in this direction's arrow.
    ///
    /// ```
    /// use cyql_core::Direction;
    ///
    /// assert_eq!(Direction::From.arrow(Some("[r:KNOWS]")), "-[r:KNOWS]->");
    /// assert_eq!(Direction::To.arrow(None), "<--");
    /// ```
    pub fn arrow(self, bracket: Option<&str>) -> String {
        let bracket = bracket.unwrap_or("");
        match self {
            Direction::From => format!("-{}->", bracket),
            Direction::To => format!("<-{}-", bracket),
            Direction::Both | Direction::None => format!("-{}-", bracket),
        }
    }
}

/// Selects one endpoint of a relationship pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSelector {
    /// Alias of the node; generated when missing.
    pub alias: Option<String>,
    /// Optional node label.
    pub label: Option<String>,
    /// Inline property filter.
    pub properties: Properties,
}

impl NodeSelector {
    /// A selector with nothing set; its alias is generated.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector referring to an existing alias.
    pub fn alias(alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::default()
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the property filter.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// Alias, type and properties of the relationship itself.
///
/// With neither alias nor label the relationship is emitted as a bare arrow
/// and its properties are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipAttributes {
    /// Alias of the relationship.
    pub alias: Option<String>,
    /// Relationship type.
    pub label: Option<String>,
    /// Inline property filter.
    pub properties: Properties,
}

impl RelationshipAttributes {
    /// Attributes with nothing set (bare arrow).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the relationship type.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the property filter.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Whether a `[...]` segment is emitted.
    pub fn is_bracketed(&self) -> bool {
        self.alias.is_some() || self.label.is_some()
    }
}

/// Compose `alias[:Label][ {props}]` from already-resolved parts.
pub(crate) fn compose_reference(alias: &str, label: Option<&str>, inline: &str) -> String {
    let mut out = String::from(alias);
    if let Some(label) = label.filter(|l| !l.is_empty()) {
        out.push(':');
        out.push_str(label);
    }
    if !inline.is_empty() {
        out.push(' ');
        out.push_str(inline);
    }
    out
}
