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

//! Inline property tokens and their alias-namespaced parameters.

use tracing::warn;

use crate::value::{Params, Properties};

/// Replace every character outside `[A-Za-z0-9]` with `_`.
///
/// ```
/// use cyql_core::sanitize_parameter_name;
///
/// assert_eq!(sanitize_parameter_name("first-name"), "first_name");
/// assert_eq!(sanitize_parameter_name("é"), "_");
/// ```
pub fn sanitize_parameter_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Parameter key for `property` on `alias`: `<alias>_<sanitized property>`.
///
/// Keys are only namespaced as far as the formula allows. When one alias
/// is another followed by `_`, as with the `car`/`car_1` pair produced by
/// alias disambiguation, a property such as `1_id` on `car` and `id` on
/// `car_1` both map to `car_1_id`. The builder keeps the later value and
/// logs a warning.
///
/// ```
/// use cyql_core::parameter_key;
///
/// assert_eq!(parameter_key("car", "first-name"), "car_first_name");
/// assert_eq!(parameter_key("car", "1_id"), parameter_key("car_1", "id"));
/// ```
pub fn parameter_key(alias: &str, property: &str) -> String {
    format!("{}_{}", alias, sanitize_parameter_name(property))
}

/// Serialize `properties` for inline use in a pattern.
///
/// Returns the `{name: $key, ...}` token (empty when there are no
/// properties) and the parameters it references. Two property names that
/// sanitize to the same key share one parameter; the later value wins.
///
/// # Examples
///
/// ```
/// use cyql_core::{inline_properties, properties, CypherValue};
///
/// let (token, params) = inline_properties("car", &properties([("id", 1)]));
/// assert_eq!(token, "{id: $car_id}");
/// assert_eq!(params.get("car_id"), Some(&CypherValue::Int(1)));
/// ```
pub fn inline_properties(alias: &str, properties: &Properties) -> (String, Params) {
    let mut params = Params::new();
    if properties.is_empty() {
        return (String::new(), params);
    }

    let entries: Vec<String> = properties
        .iter()
        .map(|(name, value)| {
            let key = parameter_key(alias, name);
            let entry = format!("{}: ${}", name, key);
            if params.insert(key.clone(), value.clone()).is_some() {
                warn!(
                    target: "cyql::params",
                    alias = alias,
                    property = %name,
                    key = %key,
                    "property sanitizes to a key already in use, later value wins"
                );
            }
            entry
        })
        .collect();

    (format!("{{{}}}", entries.join(", ")), params)
}
