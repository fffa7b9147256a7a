// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::OperationType;
use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::schema_builder::SchemaBuilder;
use crate::type_definition::TypeDefinition;
use crate::type_ref::TypeRef;

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";

/// The immutable type registry built once from SDL text and shared read-only
/// across validations.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) type_definitions: IndexMap<String, TypeDefinition>,
    pub(crate) query_root: String,
    pub(crate) mutation_root: Option<String>,
}

impl Schema {
    pub fn from_sdl(sdl: &str) -> Result<Schema, SchemaError> {
        SchemaBuilder::new().build(sdl)
    }

    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_definitions.get(name)
    }

    /// The object type serving as the root of the given operation kind, if
    /// the schema binds one.
    pub fn root_type(&self, operation_type: OperationType) -> Option<&TypeDefinition> {
        let root_name = match operation_type {
            OperationType::Query => Some(self.query_root.as_str()),
            OperationType::Mutation => self.mutation_root.as_deref(),
            OperationType::Subscription => None,
        };

        root_name.and_then(|name| self.type_definition(name))
    }

    /// The declared type of `argument_name` on the root field `field_name`,
    /// searching the query root first and the mutation root second.
    pub fn argument_type(&self, field_name: &str, argument_name: &str) -> Option<&TypeRef> {
        [OperationType::Query, OperationType::Mutation]
            .into_iter()
            .filter_map(|op| self.root_type(op))
            .filter_map(|root| root.fields())
            .filter_map(|fields| fields.get(field_name))
            .find_map(|field| {
                field
                    .arguments
                    .get(argument_name)
                    .map(|argument| &argument.ty)
            })
    }
}
