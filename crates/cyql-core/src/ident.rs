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

//! Alias generation and the alias table that guards against collisions.
//!
//! Generated aliases walk the lowercase alphabet: `a..z`, then `aa..az`,
//! `ba..bz`, and so on through `zz` before moving to three letters. Each
//! exhausted cycle of 26 letters fixes a new prefix for the next cycle.
//!
//! Explicit aliases that are already taken receive a numeric suffix derived
//! from the number of registered aliases sharing that prefix, so repeated
//! registration of `car` yields `car`, `car_1`, `car_2`, ...

use indexmap::IndexMap;
use tracing::debug;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Produces short lowercase aliases in a fixed, deterministic order.
///
/// The generator never repeats a value. It knows nothing about which aliases
/// are registered; [`AliasTable`] and the builder take care of skipping
/// values that a caller claimed explicitly.
#[derive(Debug, Clone, Default)]
pub struct IdentifierGenerator {
    base: String,
    offset: usize,
    cycles: usize,
}

impl IdentifierGenerator {
    /// Create a generator positioned at `a`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next alias in the sequence.
    pub fn next_identifier(&mut self) -> String {
        if self.offset == ALPHABET.len() {
            self.cycles += 1;
            self.base = cycle_prefix(self.cycles);
            self.offset = 0;
        }
        let mut alias = String::with_capacity(self.base.len() + 1);
        alias.push_str(&self.base);
        alias.push(ALPHABET[self.offset] as char);
        self.offset += 1;
        alias
    }
}

// Bijective base-26: 1 -> "a", 26 -> "z", 27 -> "aa".
fn cycle_prefix(mut cycle: usize) -> String {
    let mut letters = Vec::new();
    while cycle > 0 {
        cycle -= 1;
        letters.push(ALPHABET[cycle % ALPHABET.len()]);
        cycle /= ALPHABET.len();
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A registered node or relationship alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    /// The alias as it appears in the statement.
    pub alias: String,
    /// The label or relationship type; empty when none was given.
    pub label: String,
}

/// Aliases committed to a statement, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: IndexMap<String, AliasEntry>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `alias` is registered.
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// Look up a registered alias.
    pub fn get(&self, alias: &str) -> Option<&AliasEntry> {
        self.entries.get(alias)
    }

    /// Register `alias` with its label.
    ///
    /// Re-registering an existing alias replaces its label; its position in
    /// declaration order is unchanged.
    pub fn register(&mut self, alias: impl Into<String>, label: impl Into<String>) {
        let alias = alias.into();
        self.entries.insert(
            alias.clone(),
            AliasEntry {
                alias,
                label: label.into(),
            },
        );
    }

    /// Return `requested` if it is free, otherwise `requested_<n>`.
    ///
    /// `n` starts at the number of registered aliases beginning with
    /// `requested` and moves up until the candidate is free.
    pub fn disambiguate(&self, requested: &str) -> String {
        if !self.contains(requested) {
            return requested.to_string();
        }

        let mut n = self
            .entries
            .keys()
            .filter(|alias| alias.starts_with(requested))
            .count();
        loop {
            let candidate = format!("{}_{}", requested, n);
            if !self.contains(&candidate) {
                debug!(
                    target: "cyql::alias",
                    requested = requested,
                    resolved = %candidate,
                    "alias already registered, suffixed"
                );
                return candidate;
            }
            n += 1;
        }
    }

    /// Iterate over registered aliases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.values()
    }

    /// Registered alias names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
