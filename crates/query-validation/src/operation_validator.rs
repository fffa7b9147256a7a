// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{FragmentDefinition, OperationDefinition, OperationType, VariableDefinition},
};
use async_graphql_value::{ConstValue, Name};
use indexmap::IndexMap;
use schema_model::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema, TypeRef};
use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, ErrorConvention};
use crate::operation::ValidatedOperation;
use crate::selection_set_validator::SelectionSetValidator;
use crate::validation_error::ValidationError;

/// A variable declared on an operation: its declared type, the position of
/// the declaration, and the runtime value bound to it, if any.
///
/// `value` is `None` when the caller performed a purely static validation
/// (no variable map) and the declaration carries no default.
#[derive(Debug)]
pub(crate) struct OperationVariable {
    pub(crate) ty: TypeRef,
    pub(crate) pos: Pos,
    pub(crate) value: Option<ConstValue>,
}

/// Context for validating an operation.
pub(crate) struct OperationValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
    convention: ErrorConvention,
}

impl<'a> OperationValidator<'a> {
    #[must_use]
    pub(crate) fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
        fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
        convention: ErrorConvention,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            fragment_definitions,
            convention,
        }
    }

    /// Validate operation. Operation defines a GraphQL top-level operation such
    /// as
    /// ```graphql
    ///    mutation create($name: String!) {
    ///       createName(name: $name) {
    ///          id
    ///       }
    ///    }
    /// ```
    ///
    /// Validations performed:
    /// - The operation's root type exists
    /// - Each declared variable resolves to a value (bound, defaulted, or
    ///   left unbound for static validation; see [`validate_variables`](Self::validate_variables))
    /// - The selected fields are valid (see [`SelectionSetValidator`] for details)
    ///
    /// # Returns
    ///   A validated operation with all variables and fields resolved and normalized.
    pub(crate) fn validate(
        self,
        operation: Positioned<OperationDefinition>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ValidatedOperation, ValidationError> {
        let root_name = match operation.node.ty {
            OperationType::Query => QUERY_ROOT_TYPENAME,
            OperationType::Mutation => MUTATION_ROOT_TYPENAME,
            OperationType::Subscription => {
                return Err(ValidationError::SubscriptionNotSupported);
            }
        };

        let container_type = self
            .schema
            .root_type(operation.node.ty)
            .ok_or_else(|| ValidationError::OperationNotFound(root_name.to_string()))?;

        let variables = self.validate_variables(&operation.node.variable_definitions)?;

        let selection_set_validator = SelectionSetValidator::new(
            self.schema,
            container_type,
            &variables,
            &self.fragment_definitions,
            self.convention,
        );

        let fields =
            selection_set_validator.validate(&operation.node.selection_set, diagnostics)?;

        Ok(ValidatedOperation {
            name: self.operation_name,
            typ: operation.node.ty,
            fields,
        })
    }

    /// Validate variables.
    ///
    /// When the caller supplied a variable map, every declared variable must
    /// resolve to a value from the map, falling back to the declared default;
    /// an unresolvable variable is an error. Without a map, validation is
    /// static: declared defaults still bind, anything else stays unbound.
    fn validate_variables(
        &self,
        variable_definitions: &[Positioned<VariableDefinition>],
    ) -> Result<IndexMap<Name, OperationVariable>, ValidationError> {
        variable_definitions
            .iter()
            .map(|variable_definition| {
                let name = &variable_definition.node.name;
                let value = self.var_value(&variable_definition.node)?;

                Ok((
                    name.node.clone(),
                    OperationVariable {
                        ty: TypeRef::from(&variable_definition.node.var_type.node),
                        // The definition's own position starts at the `$`
                        // sigil; the name's position starts one column past
                        // it. Diagnostics point at the sigil.
                        pos: variable_definition.pos,
                        value,
                    },
                ))
            })
            .collect()
    }

    fn var_value(
        &self,
        variable_definition: &VariableDefinition,
    ) -> Result<Option<ConstValue>, ValidationError> {
        let name = &variable_definition.name;
        let default = variable_definition
            .default_value
            .as_ref()
            .map(|default| default.node.clone());

        match &self.variables {
            Some(variables) => match variables.get(name.node.as_str()) {
                Some(resolved) => ConstValue::from_json(resolved.to_owned())
                    .map(Some)
                    .map_err(|e| {
                        ValidationError::MalformedVariable(
                            name.node.as_str().to_string(),
                            name.pos,
                            e,
                        )
                    }),
                None => match default {
                    Some(default) => Ok(Some(default)),
                    None => Err(ValidationError::VariableNotFound(
                        name.node.as_str().to_string(),
                        name.pos,
                    )),
                },
            },
            None => Ok(default),
        }
    }
}
