// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::{ConstValue, Name};
use indexmap::IndexMap;
use serde::Serialize;

/// One selection that passed validation. Unlike the parsed `Field`, this
/// carries no positions and no variable references: arguments are resolved
/// to const values, and any fragment the selection came through is already
/// flattened away.
#[derive(Debug, Serialize)]
pub struct ValidatedField {
    pub alias: Option<Name>,
    pub name: Name,
    /// Arguments in the declaration order of the field definition, with
    /// defaults applied and bound variables substituted (an unbound
    /// variable resolves to null). Empty if none were supplied.
    pub arguments: IndexMap<String, ConstValue>,

    /// Selections nested under this field. Empty for scalar and enum
    /// fields.
    pub subfields: Vec<ValidatedField>,
}

impl ValidatedField {
    /// The key this field's value appears under in a response: the alias
    /// when one was written, the field name otherwise.
    pub fn output_name(&self) -> String {
        self.alias.as_ref().unwrap_or(&self.name).to_string()
    }
}
