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
    Positioned,
    types::{Field, FragmentDefinition, FragmentSpread, Selection, SelectionSet},
};
use async_graphql_value::Name;
use indexmap::IndexMap;
use schema_model::{FieldDefinition, Schema, TypeDefinition};

use crate::arguments_validator::ArgumentValidator;
use crate::diagnostic::{Diagnostic, ErrorConvention};
use crate::field::ValidatedField;
use crate::operation_validator::OperationVariable;
use crate::validation_error::ValidationError;

/// Context for validating a selection set.
#[derive(Debug)]
pub(crate) struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The parent type of this field.
    container_type: &'a TypeDefinition,
    variables: &'a IndexMap<Name, OperationVariable>,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    convention: ErrorConvention,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub(crate) fn new(
        schema: &'a Schema,
        container_type: &'a TypeDefinition,
        variables: &'a IndexMap<Name, OperationVariable>,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
        convention: ErrorConvention,
    ) -> Self {
        Self {
            schema,
            container_type,
            variables,
            fragment_definitions,
            convention,
        }
    }

    /// Validate selection set.
    ///
    /// Validations performed:
    /// - Each field is defined in the `container_type`
    /// - Each fragment referred is defined and does not spread itself
    /// - Arguments to each field are valid (see [`ArgumentValidator`])
    ///
    /// # Returns
    ///   A vector of validated fields (any fragment is resolved and inlined, thus normalizing the fields)
    pub(crate) fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        self.validate_with_trail(selection_set, &mut vec![], diagnostics)
    }

    fn validate_with_trail(
        &self,
        selection_set: &Positioned<SelectionSet>,
        fragment_trail: &mut Vec<Name>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        selection_set
            .node
            .items
            .iter()
            .map(|selection| self.validate_selection(selection, fragment_trail, diagnostics))
            .collect::<Result<Vec<_>, _>>()
            .map(|f| f.into_iter().flatten().collect())
    }

    fn validate_selection(
        &self,
        selection: &Positioned<Selection>,
        fragment_trail: &mut Vec<Name>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        match &selection.node {
            Selection::Field(field) => self
                .validate_field(field, fragment_trail, diagnostics)
                .map(|field| vec![field]),
            Selection::FragmentSpread(fragment_spread) => {
                let fragment_name = &fragment_spread.node.fragment_name.node;
                if fragment_trail.contains(fragment_name) {
                    return Err(ValidationError::FragmentCycle(
                        fragment_name.to_string(),
                        fragment_spread.pos,
                    ));
                }

                let fragment_definition = self.fragment_definition(fragment_spread)?;
                fragment_trail.push(fragment_name.clone());
                let fields = self.validate_with_trail(
                    &fragment_definition.selection_set,
                    fragment_trail,
                    diagnostics,
                );
                fragment_trail.pop();
                fields
            }
            Selection::InlineFragment(inline_fragment) => Err(
                ValidationError::InlineFragmentNotSupported(inline_fragment.pos),
            ),
        }
    }

    fn validate_field(
        &self,
        field: &Positioned<Field>,
        fragment_trail: &mut Vec<Name>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ValidatedField, ValidationError> {
        // Special treatment for the __typename field, since we are not supposed to expose it as
        // a normal field (for example, we should not declare that the "Concert" type has a __typename field)
        if field.node.name.node.as_str() == "__typename" {
            if !field.node.arguments.is_empty() {
                Err(ValidationError::StrayArguments(
                    field
                        .node
                        .arguments
                        .iter()
                        .map(|arg| arg.0.node.to_string())
                        .collect(),
                    field.node.name.to_string(),
                    field.pos,
                ))
            } else if !field.node.selection_set.node.items.is_empty() {
                Err(ValidationError::ScalarWithField(
                    field.node.name.to_string(),
                    field.pos,
                ))
            } else {
                Ok(ValidatedField {
                    alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                    name: field.node.name.node.clone(),
                    arguments: IndexMap::new(),
                    subfields: vec![],
                })
            }
        } else {
            let field_definition = self.get_field_definition(field)?;
            let field_type_definition = self.get_type_definition(field_definition, field)?;

            let subfields = match field_type_definition {
                TypeDefinition::Object(_) => {
                    let subfield_validator = SelectionSetValidator::new(
                        self.schema,
                        field_type_definition,
                        self.variables,
                        self.fragment_definitions,
                        self.convention,
                    );
                    // The trail survives nesting so that a fragment spreading
                    // itself through a subfield still trips the cycle check.
                    subfield_validator.validate_with_trail(
                        &field.node.selection_set,
                        fragment_trail,
                        diagnostics,
                    )?
                }
                TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => {
                    if !field.node.selection_set.node.items.is_empty() {
                        return Err(ValidationError::ScalarWithField(
                            field.node.name.to_string(),
                            field.pos,
                        ));
                    }
                    vec![]
                }
            };

            let argument_validator =
                ArgumentValidator::new(self.schema, self.variables, field, self.convention);

            let arguments = argument_validator.validate(field_definition, diagnostics)?;

            Ok(ValidatedField {
                alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                name: field.node.name.node.clone(),
                arguments,
                subfields,
            })
        }
    }

    fn fragment_definition(
        &self,
        fragment: &Positioned<FragmentSpread>,
    ) -> Result<&'a FragmentDefinition, ValidationError> {
        self.fragment_definitions
            .get(&fragment.node.fragment_name.node)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment.node.fragment_name.node.as_str().to_string(),
                    fragment.pos,
                )
            })
    }

    fn get_type_definition(
        &self,
        field_definition: &FieldDefinition,
        field: &Positioned<Field>,
    ) -> Result<&'a TypeDefinition, ValidationError> {
        let leaf_name = field_definition.ty.leaf_name();

        match self.schema.type_definition(leaf_name) {
            None => Err(ValidationError::InvalidFieldType(
                leaf_name.to_string(),
                field.pos,
            )),
            Some(type_definition) => Ok(type_definition),
        }
    }

    fn get_field_definition(
        &self,
        field: &Positioned<Field>,
    ) -> Result<&'a FieldDefinition, ValidationError> {
        let field_definition = self
            .container_type
            .fields()
            .and_then(|fields| fields.get(field.node.name.node.as_str()));

        match field_definition {
            None => Err(ValidationError::InvalidField(
                field.node.name.node.as_str().to_string(),
                self.container_type.name().to_string(),
                field.pos,
            )),
            Some(field_definition) => Ok(field_definition),
        }
    }
}
