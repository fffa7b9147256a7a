// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{Pos, Positioned, types::Field};
use async_graphql_value::{ConstValue, Name, Value};
use indexmap::IndexMap;
use schema_model::{FieldDefinition, ScalarType, Schema, TypeDefinition, TypeRef};

use crate::diagnostic::{Diagnostic, ErrorConvention, MismatchSource, TypeMismatch, render_value};
use crate::operation_validator::OperationVariable;
use crate::validation_error::ValidationError;

pub(crate) struct ArgumentValidator<'a> {
    schema: &'a Schema,
    variables: &'a IndexMap<Name, OperationVariable>,
    field: &'a Positioned<Field>,
    convention: ErrorConvention,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub(crate) fn new(
        schema: &'a Schema,
        variables: &'a IndexMap<Name, OperationVariable>,
        field: &'a Positioned<Field>,
        convention: ErrorConvention,
    ) -> Self {
        Self {
            schema,
            variables,
            field,
            convention,
        }
    }

    /// Validations performed:
    /// - All required arguments are provided (a declared default counts)
    /// - No stray arguments (arguments not defined on the field)
    /// - Every supplied value matches its declared type; mismatches
    ///   accumulate in `diagnostics` rather than stopping at the first
    ///
    /// Returns the arguments coerced to const values, with bound variables
    /// substituted, in declaration order.
    pub(crate) fn validate(
        &self,
        field_definition: &FieldDefinition,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<IndexMap<String, ConstValue>, ValidationError> {
        let field_name = self.field.node.name.node.as_str();

        // Clients such as Apollo routinely send values captured from earlier
        // responses, which carry a __typename entry; don't treat it as stray.
        let mut supplied: IndexMap<&str, &Positioned<Value>> = self
            .field
            .node
            .arguments
            .iter()
            .filter(|(name, _)| name.node != "__typename")
            .map(|(name, value)| (name.node.as_str(), value))
            .collect();

        let mut validated = IndexMap::new();

        for argument_definition in field_definition.arguments.values() {
            let argument_name = argument_definition.name.as_str();

            match supplied.shift_remove(argument_name) {
                Some(value) => {
                    let mut mismatches = vec![];
                    self.check_value(
                        &argument_definition.ty,
                        &value.node,
                        value.pos,
                        &MismatchSource::Literal,
                        &mut mismatches,
                    )?;

                    diagnostics.extend(mismatches.into_iter().map(|mismatch| {
                        mismatch.into_diagnostic(self.convention, argument_name, &value.node)
                    }));

                    validated.insert(
                        argument_name.to_string(),
                        self.resolve_value(value.node.clone())?,
                    );
                }
                None => {
                    if let Some(default) = &argument_definition.default_value {
                        validated.insert(argument_name.to_string(), default.clone());
                    } else if !argument_definition.ty.nullable() {
                        return Err(ValidationError::RequiredArgumentNotFound(
                            argument_name.to_string(),
                            argument_definition.ty.to_string(),
                            self.field.pos,
                        ));
                    }
                }
            }
        }

        if !supplied.is_empty() {
            let stray = supplied.keys().map(|name| name.to_string()).collect();
            return Err(ValidationError::StrayArguments(
                stray,
                field_name.to_string(),
                self.field.pos,
            ));
        }

        Ok(validated)
    }

    /// The recursive type-shape match. Findings go to `out` (list elements
    /// are each checked, in index order); only broken inputs that the schema
    /// builder should have made impossible surface as `Err`.
    fn check_value(
        &self,
        expected: &TypeRef,
        value: &Value,
        pos: Pos,
        source: &MismatchSource,
        out: &mut Vec<TypeMismatch>,
    ) -> Result<(), ValidationError> {
        if let Value::Variable(name) = value {
            return self.check_variable(expected, name, pos, out);
        }

        match expected {
            TypeRef::NonNull(inner) => {
                if matches!(value, Value::Null) {
                    out.push(mismatch(expected, "null", pos, source));
                    Ok(())
                } else {
                    self.check_value(inner, value, pos, source, out)
                }
            }

            TypeRef::List(inner) => match value {
                Value::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let mut nested = vec![];
                        self.check_value(inner, item, pos, source, &mut nested)?;
                        out.extend(nested.into_iter().map(|m| TypeMismatch {
                            detail: format!("In element #{index}: {}", m.detail),
                            ..m
                        }));
                    }
                    Ok(())
                }
                Value::Null => Ok(()),
                // A single value stands in for a one-element list; it is
                // checked against the element type under the caller's own
                // context, so its findings read like top-level ones.
                _ => self.check_value(inner, value, pos, source, out),
            },

            TypeRef::Named(name) => match self.schema.type_definition(name) {
                Some(TypeDefinition::Enum(enum_type)) => {
                    let candidate = match value {
                        Value::Enum(member) => Some(member.as_str()),
                        // JSON carries no enum kind, so a string bound to a
                        // variable counts as an enum name candidate.
                        Value::String(text)
                            if matches!(source, MismatchSource::Variable { .. }) =>
                        {
                            Some(text.as_str())
                        }
                        _ => None,
                    };

                    match (candidate, value) {
                        (Some(member), _) if enum_type.contains(member) => {}
                        (Some(member), _) => out.push(mismatch(name, member, pos, source)),
                        (None, Value::Null) => {}
                        (None, other) => {
                            out.push(mismatch(name, render_value(other), pos, source))
                        }
                    }
                    Ok(())
                }

                Some(TypeDefinition::Scalar(scalar)) => {
                    if !literal_compatible(scalar, value) {
                        out.push(mismatch(name, render_value(value), pos, source));
                    }
                    Ok(())
                }

                Some(TypeDefinition::Object(_)) | None => Err(
                    ValidationError::InvalidFieldType(name.to_string(), pos),
                ),
            },
        }
    }

    /// A variable usage is checked statically: the declared type's leaf name
    /// must equal the expected leaf name. The bound runtime value is only
    /// consulted when the caller supplied a variable map, in which case it
    /// is substituted at the usage site and re-checked.
    fn check_variable(
        &self,
        expected: &TypeRef,
        name: &Name,
        usage: Pos,
        out: &mut Vec<TypeMismatch>,
    ) -> Result<(), ValidationError> {
        let Some(variable) = self.variables.get(name) else {
            return Err(ValidationError::VariableNotFound(name.to_string(), usage));
        };

        let source = MismatchSource::Variable {
            name: name.to_string(),
            declaration: variable.pos,
            usage,
        };

        let expected_leaf = expected.leaf_name();

        // A non-null-declared variable satisfies a nullable expectation, but
        // a nullable declaration satisfies a non-null expectation only when a
        // default or bound value guarantees it carries one.
        let compatible = variable.ty.leaf_name() == expected_leaf
            && !(matches!(expected, TypeRef::NonNull(_))
                && variable.ty.nullable()
                && variable.value.is_none());

        if !compatible {
            let found = match &variable.value {
                Some(bound) => render_value(&bound.clone().into_value()),
                None => format!("${name}"),
            };
            out.push(mismatch(expected_leaf, found, usage, &source));
            return Ok(());
        }

        if let Some(bound) = &variable.value {
            let bound = bound.clone().into_value();
            self.check_value(expected, &bound, usage, &source, out)?;
        }

        Ok(())
    }

    fn resolve_value(&self, value: Value) -> Result<ConstValue, ValidationError> {
        value.into_const_with(|name| {
            Ok(self
                .variables
                .get(&name)
                .and_then(|variable| variable.value.clone())
                .unwrap_or(ConstValue::Null))
        })
    }
}

fn mismatch(
    expected: impl std::fmt::Display,
    found: impl std::fmt::Display,
    pos: Pos,
    source: &MismatchSource,
) -> TypeMismatch {
    TypeMismatch {
        detail: format!("Expected type \"{expected}\", found {found}."),
        pos,
        source: source.clone(),
    }
}

/// Which literal kinds each built-in scalar accepts. Custom scalars accept
/// any literal; deeper checks (ranges, formats) belong to execution.
fn literal_compatible(scalar: &ScalarType, value: &Value) -> bool {
    if !scalar.built_in {
        return true;
    }

    match (scalar.name.as_str(), value) {
        (_, Value::Null) => true,
        ("Int", Value::Number(number)) => number.as_i64().is_some(),
        ("Float", Value::Number(_)) => true,
        ("String", Value::String(_)) => true,
        ("Boolean", Value::Boolean(_)) => true,
        ("ID", Value::String(_)) => true,
        ("ID", Value::Number(number)) => number.as_i64().is_some(),
        _ => false,
    }
}
