// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Pos,
    types::{DocumentOperations, ExecutableDocument},
};
use async_graphql_value::Name;
use schema_model::Schema;
use serde_json::{Map, Value};
use tracing::{error, instrument};

use crate::diagnostic::{Diagnostic, ErrorConvention};
use crate::operation::ValidatedOperation;
use crate::operation_validator::OperationValidator;
use crate::validation_error::ValidationError;

/// Context for validating a document.
pub struct DocumentValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    convention: ErrorConvention,
}

impl<'a> DocumentValidator<'a> {
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            convention: ErrorConvention::default(),
        }
    }

    /// Report variable-sourced mismatches under a different wording and
    /// location convention. See [`ErrorConvention`].
    pub fn with_convention(mut self, convention: ErrorConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Parse and validate a query payload in one step.
    pub fn validate_str(self, query: &str) -> Result<ValidatedOperation, Vec<Diagnostic>> {
        match parse_query(query) {
            Ok(document) => self.validate(document),
            Err(error) => Err(vec![error.into()]),
        }
    }

    /// Validate the query payload.
    ///
    /// Validations performed:
    /// - Validate that either there is only one operation or the operation name specified matches one of the operations in the document
    /// - Validate that there is at least one operation
    /// - Other validations are delegated to the operation validator
    ///
    /// # Returns
    ///   The validated operation, or every diagnostic found. Argument-type
    ///   mismatches accumulate across the whole operation; a structural
    ///   failure stops validation and becomes the final diagnostic.
    #[instrument(name = "DocumentValidator::validate", skip(self, document))]
    pub fn validate(
        self,
        document: ExecutableDocument,
    ) -> Result<ValidatedOperation, Vec<Diagnostic>> {
        let mut diagnostics = vec![];

        match self.validate_document(document, &mut diagnostics) {
            Ok(operation) if diagnostics.is_empty() => Ok(operation),
            Ok(_) => Err(diagnostics),
            Err(error) => {
                diagnostics.push(error.into());
                Err(diagnostics)
            }
        }
    }

    fn validate_document(
        self,
        document: ExecutableDocument,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ValidatedOperation, ValidationError> {
        let (operation_name, raw_operation) = match document.operations {
            DocumentOperations::Single(operation) => Ok((self.operation_name, operation)),
            DocumentOperations::Multiple(mut operations) => {
                if operations.is_empty() {
                    Err(ValidationError::NoOperationFound)
                } else {
                    match self.operation_name {
                        None if operations.len() == 1 => {
                            // Per https://graphql.org/learn/queries/#operation-name, `operationName` is required
                            // only for multiple operations, but async-graphql parses a named operation (`query Foo { ... }`)
                            // to `DocumentOperations::Multiple` even if there is only one operation. So we add an additional
                            // check here to make sure that the operation name is enforced only for truly multiple operations.

                            // This unwrap is okay because we already check that there is exactly one operation.
                            let (operation_name, operation) =
                                operations.into_iter().next().unwrap();
                            Ok((Some(operation_name.to_string()), operation))
                        }
                        None => Err(ValidationError::MultipleOperationsNoOperationName),
                        Some(operation_name) => {
                            let operation = operations.remove(&Name::new(&operation_name));

                            match operation {
                                None => {
                                    Err(ValidationError::MultipleOperationsUnmatchedOperationName(
                                        operation_name,
                                    ))
                                }
                                Some(operation) => Ok((Some(operation_name), operation)),
                            }
                        }
                    }
                }
            }
        }?;

        let operation_validator = OperationValidator::new(
            self.schema,
            operation_name,
            self.variables,
            document.fragments,
            self.convention,
        );

        operation_validator.validate(raw_operation, diagnostics)
    }
}

fn parse_query(query: &str) -> Result<ExecutableDocument, ValidationError> {
    async_graphql_parser::parse_query(query).map_err(|error| {
        error!(%error, "Failed to parse query");
        let (message, pos1, pos2) = match error {
            async_graphql_parser::Error::Syntax {
                message,
                start,
                end,
            } => {
                // Error::Syntax's message is formatted with newlines, escape them properly
                let message = message.escape_debug();
                (format!("Syntax error:\\n{message}"), start, end)
            }
            async_graphql_parser::Error::MultipleRoots { root, schema, pos } => {
                (format!("Multiple roots of {root} type"), schema, Some(pos))
            }
            async_graphql_parser::Error::MissingQueryRoot { pos } => {
                ("Missing query root".to_string(), pos, None)
            }
            async_graphql_parser::Error::MultipleOperations {
                anonymous,
                operation,
            } => (
                "Multiple operations".to_string(),
                anonymous,
                Some(operation),
            ),
            async_graphql_parser::Error::OperationDuplicated {
                operation: _,
                first,
                second,
            } => ("Operation duplicated".to_string(), first, Some(second)),
            async_graphql_parser::Error::FragmentDuplicated {
                fragment,
                first,
                second,
            } => (
                format!("Fragment {fragment} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::MissingOperation => {
                ("Missing operation".to_string(), Pos::default(), None)
            }
            _ => ("Unknown error".to_string(), Pos::default(), None),
        };

        ValidationError::QueryParsingFailed(message, pos1, pos2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_graphql_value::ConstValue;

    use crate::diagnostic::{ARGUMENTS_OF_CORRECT_TYPE, Location};

    #[test]
    fn argument_valid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"{ greet(mood: HAPPY) }"#)
            .expect("expected a valid operation");

        assert_eq!(operation.fields.len(), 1);
        assert_eq!(operation.fields[0].name.as_str(), "greet");
        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::Enum(Name::new("HAPPY")))
        );
    }

    #[test]
    fn invalid_enum_literal() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ greet(mood: WRONG) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"mood\" has invalid value WRONG.\nExpected type \"Mood\", found WRONG.",
                &[(1, 15)],
            )]
        );
    }

    #[test]
    fn enum_membership_is_case_sensitive() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ greet(mood: happy) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"mood\" has invalid value happy.\nExpected type \"Mood\", found happy.",
                &[(1, 15)],
            )]
        );
    }

    #[test]
    fn string_literal_is_not_an_enum_value() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ greet(mood: "HAPPY") }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"mood\" has invalid value \"HAPPY\".\nExpected type \"Mood\", found \"HAPPY\".",
                &[(1, 15)],
            )]
        );
    }

    #[test]
    fn null_for_non_null_argument() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ greet(mood: null) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"mood\" has invalid value null.\nExpected type \"Mood!\", found null.",
                &[(1, 15)],
            )]
        );
    }

    #[test]
    fn list_elements_accumulate_in_order() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        // Elements report the position of the list literal itself.
        assert_eq!(
            validator.validate_str(r#"{ leave(moods: [HAPPY, WRONG, SAD]) }"#).expect_err("expected diagnostics"),
            vec![
                mismatch(
                    "Argument \"moods\" has invalid value [HAPPY, WRONG, SAD].\nIn element #1: Expected type \"Mood\", found WRONG.",
                    &[(1, 16)],
                ),
                mismatch(
                    "Argument \"moods\" has invalid value [HAPPY, WRONG, SAD].\nIn element #2: Expected type \"Mood\", found SAD.",
                    &[(1, 16)],
                ),
            ]
        );
    }

    #[test]
    fn nested_list_elements_compose_prefixes() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ seat(rows: [[HAPPY], [WRONG]]) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"rows\" has invalid value [[HAPPY], [WRONG]].\nIn element #1: In element #0: Expected type \"Mood\", found WRONG.",
                &[(1, 14)],
            )]
        );
    }

    #[test]
    fn single_value_coerces_to_list() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"{ leave(moods: HAPPY) }"#)
            .expect("expected a valid operation");
        assert_eq!(
            operation.fields[0].arguments.get("moods"),
            Some(&ConstValue::Enum(Name::new("HAPPY")))
        );

        // The coerced value reports without an element prefix.
        assert_eq!(
            validator.validate_str(r#"{ leave(moods: WRONG) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"moods\" has invalid value WRONG.\nExpected type \"Mood\", found WRONG.",
                &[(1, 16)],
            )]
        );
    }

    #[test]
    fn empty_enum_rejects_every_value() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ vacuum(nothing: ANYTHING) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"nothing\" has invalid value ANYTHING.\nExpected type \"Nothing\", found ANYTHING.",
                &[(1, 19)],
            )]
        );
    }

    #[test]
    fn bound_variable_value_rechecked_at_usage() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "wrong": "WRONG" }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables));

        // Two locations: the declaration, then the usage. The bound string
        // renders bare, as an enum-name candidate.
        assert_eq!(
            validator.validate_str(r#"query($wrong: Mood!) { greet(mood: $wrong) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Expected type \"Mood\", found WRONG.",
                &[(1, 7), (1, 36)],
            )]
        );
    }

    #[test]
    fn bound_variable_value_rechecked_legacy_convention() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "wrong": "WRONG" }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables))
            .with_convention(ErrorConvention::Legacy);

        assert_eq!(
            validator.validate_str(r#"query($wrong: Mood!) { greet(mood: $wrong) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"mood\" has invalid value $wrong.\nExpected type \"Mood\", found WRONG.",
                &[(1, 36)],
            )]
        );
    }

    #[test]
    fn bound_variable_list_elements() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "wrong": ["WRONG"] }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables));

        assert_eq!(
            validator.validate_str(r#"query($wrong: [Mood]) { leave(moods: $wrong) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "In element #0: Expected type \"Mood\", found WRONG.",
                &[(1, 7), (1, 38)],
            )]
        );
    }

    #[test]
    fn bound_variable_list_elements_legacy_convention() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "wrong": ["WRONG"] }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables))
            .with_convention(ErrorConvention::Legacy);

        assert_eq!(
            validator.validate_str(r#"query($wrong: [Mood]) { leave(moods: $wrong) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"moods\" has invalid value $wrong.\nIn element #0: Expected type \"Mood\", found WRONG.",
                &[(1, 38)],
            )]
        );
    }

    #[test]
    fn single_bad_list_element() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ leave(moods: [WRONG]) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"moods\" has invalid value [WRONG].\nIn element #0: Expected type \"Mood\", found WRONG.",
                &[(1, 16)],
            )]
        );
    }

    #[test]
    fn empty_string_is_a_valid_string() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"{ crash(why: "") }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].arguments.get("why"),
            Some(&ConstValue::String(String::new()))
        );
    }

    #[test]
    fn nullable_variable_rejected_for_non_null_expectation() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"query($mood: Mood) { greet(mood: $mood) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Expected type \"Mood\", found $mood.",
                &[(1, 7), (1, 34)],
            )]
        );
    }

    #[test]
    fn nullable_variable_with_bound_value_satisfies_non_null() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "mood": "CALM" }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables));

        let operation = validator
            .validate_str(r#"query($mood: Mood) { greet(mood: $mood) }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::String("CALM".to_string()))
        );
    }

    #[test]
    fn nullable_variable_with_default_satisfies_non_null() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"query($mood: Mood = CALM) { greet(mood: $mood) }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::Enum(Name::new("CALM")))
        );
    }

    #[test]
    fn declared_type_leaf_mismatch_is_static() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        // No variable map: the check compares declared and expected leaf
        // names and reports the variable itself as the found value.
        assert_eq!(
            validator.validate_str(r#"query($str: String!) { greet(mood: $str) }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Expected type \"Mood\", found $str.",
                &[(1, 7), (1, 36)],
            )]
        );
    }

    #[test]
    fn matching_variable_without_map_passes() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"query($mood: Mood!) { greet(mood: $mood) }"#)
            .expect("expected a valid operation");

        // With nothing bound, the variable coerces to null.
        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::Null)
        );
    }

    #[test]
    fn bound_variable_valid_value_substituted() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{ "mood": "CALM" }"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables));

        let operation = validator
            .validate_str(r#"query($mood: Mood!) { greet(mood: $mood) }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::String("CALM".to_string()))
        );
    }

    #[test]
    fn undeclared_variable_invalid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let diagnostics = validator
            .validate_str(r#"{ greet(mood: $nope) }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Variable \"$nope\" is not defined");
        assert_eq!(diagnostics[0].rule, Some("NoUndefinedVariables"));
        assert_eq!(diagnostics[0].locations, vec![Location { line: 1, column: 15 }]);
    }

    #[test]
    fn declared_variable_missing_from_map_invalid() {
        let schema = create_test_schema();
        let variables = create_variables(r#"{}"#);
        let validator = DocumentValidator::new(&schema, None, Some(variables));

        let diagnostics = validator
            .validate_str(r#"query($mood: Mood!) { greet(mood: $mood) }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Variable \"$mood\" is not defined");
    }

    #[test]
    fn int_argument_type_checked() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ concert(id: "one") { id } }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"id\" has invalid value \"one\".\nExpected type \"Int\", found \"one\".",
                &[(1, 15)],
            )]
        );

        assert_eq!(
            DocumentValidator::new(&schema, None, None)
                .validate_str(r#"{ concert(id: 1.5) { id } }"#).expect_err("expected diagnostics"),
            vec![mismatch(
                "Argument \"id\" has invalid value 1.5.\nExpected type \"Int\", found 1.5.",
                &[(1, 15)],
            )]
        );
    }

    #[test]
    fn mismatches_accumulate_across_fields() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        assert_eq!(
            validator.validate_str(r#"{ greet(mood: WRONG) leave(moods: [SAD]) }"#).expect_err("expected diagnostics"),
            vec![
                mismatch(
                    "Argument \"mood\" has invalid value WRONG.\nExpected type \"Mood\", found WRONG.",
                    &[(1, 15)],
                ),
                mismatch(
                    "Argument \"moods\" has invalid value [SAD].\nIn element #0: Expected type \"Mood\", found SAD.",
                    &[(1, 35)],
                ),
            ]
        );
    }

    #[test]
    fn default_argument_applied_when_missing() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"{ pick }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].arguments.get("mood"),
            Some(&ConstValue::Enum(Name::new("CALM")))
        );
    }

    #[test]
    fn stray_argument_invalid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let diagnostics = validator
            .validate_str(r#"{ concert(id: 1, foo: "bar") { id } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Argument(s) [\"foo\"] invalid for \"concert\""
        );
        assert_eq!(diagnostics[0].rule, Some("KnownArgumentNames"));
    }

    #[test]
    fn unspecified_required_argument_invalid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let diagnostics = validator
            .validate_str(r#"{ concert { id } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Argument \"id\" of required type \"Int!\" was not provided"
        );
        assert_eq!(diagnostics[0].rule, Some("ProvidedNonNullArguments"));
    }

    #[test]
    fn invalid_subfield() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let diagnostics = validator
            .validate_str(r#"{ concert(id: 1) { id foobar } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Field \"foobar\" is not valid for type \"Concert\""
        );
        assert_eq!(diagnostics[0].rule, Some("FieldsOnCorrectType"));
    }

    #[test]
    fn aliases_valid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"{ firstConcert: concert(id: 1) { id headLine: title } }"#)
            .expect("expected a valid operation");

        assert_eq!(operation.fields[0].output_name(), "firstConcert");
        assert_eq!(operation.fields[0].subfields[1].output_name(), "headLine");
    }

    #[test]
    fn typename_selection_valid() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let operation = validator
            .validate_str(r#"{ concert(id: 1) { __typename id } }"#)
            .expect("expected a valid operation");

        assert_eq!(
            operation.fields[0].subfields[0].name.as_str(),
            "__typename"
        );
    }

    #[test]
    fn structural_error_reported_after_accumulated_mismatches() {
        let schema = create_test_schema();
        let validator = DocumentValidator::new(&schema, None, None);

        let diagnostics = validator
            .validate_str(r#"{ greet(mood: WRONG) concert { id } }"#)
            .expect_err("expected diagnostics");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].rule, Some(ARGUMENTS_OF_CORRECT_TYPE));
        assert_eq!(diagnostics[1].rule, Some("ProvidedNonNullArguments"));
    }

    #[test]
    fn multi_operations_valid() {
        let schema = create_test_schema();

        let query = r#"
            query concert1 {
                concert(id: 1) {
                    id
                    headLine: title
                }
            }

            query concert2 {
                concert(id: 2) {
                    id
                    headLine: title
                }
            }
        "#;

        let operation = DocumentValidator::new(&schema, Some("concert2".to_string()), None)
            .validate_str(query)
            .expect("expected a valid operation");

        assert_eq!(operation.name.as_deref(), Some("concert2"));
        assert_eq!(
            operation.fields[0].arguments.get("id"),
            Some(&ConstValue::Number(2.into()))
        );
    }

    #[test]
    fn multi_operations_no_operation_name_invalid() {
        let schema = create_test_schema();

        let query = r#"
            query concert1 { concert(id: 1) { id } }
            query concert2 { concert(id: 2) { id } }
        "#;

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(query)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Must provide operation name if query contains multiple operations"
        );
    }

    #[test]
    fn multi_operations_mismatched_operation_name_invalid() {
        let schema = create_test_schema();

        let query = r#"
            query concert1 { concert(id: 1) { id } }
            query concert2 { concert(id: 2) { id } }
        "#;

        let diagnostics = DocumentValidator::new(&schema, Some("foo".to_string()), None)
            .validate_str(query)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "operationName \"foo\" doesn't match any operation"
        );
    }

    #[test]
    fn single_named_operation_without_operation_name_valid() {
        let schema = create_test_schema();

        let operation = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"query ConcertById { concert(id: 1) { id } }"#)
            .expect("expected a valid operation");

        assert_eq!(operation.name.as_deref(), Some("ConcertById"));
    }

    #[test]
    fn fragment_spread_inlined() {
        let schema = create_test_schema();

        let query = r#"
            query {
                concert(id: 1) {
                    ...concertFields
                }
            }

            fragment concertFields on Concert {
                id
                title
            }
        "#;

        let operation = DocumentValidator::new(&schema, None, None)
            .validate_str(query)
            .expect("expected a valid operation");

        let subfields: Vec<_> = operation.fields[0]
            .subfields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(subfields, vec!["id", "title"]);
    }

    #[test]
    fn fragment_recursion_direct() {
        let schema = create_test_schema();

        let query = r#"
            query {
                concert(id: 1) {
                    ...concertFields
                }
            }

            fragment concertFields on Concert {
                ...concertFields
            }
        "#;

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(query)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Fragment \"concertFields\" cannot spread within itself"
        );
        assert_eq!(diagnostics[0].rule, Some("NoFragmentCycles"));
    }

    #[test]
    fn fragment_recursion_indirect() {
        let schema = create_test_schema();

        let query = r#"
            query {
                concert(id: 1) {
                    ...concertInfo
                }
            }

            fragment concertInfo on Concert {
                ...concertDetails
            }

            fragment concertDetails on Concert {
                ...concertInfo
            }
        "#;

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(query)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Fragment \"concertInfo\" cannot spread within itself"
        );
    }

    #[test]
    fn undefined_fragment_invalid() {
        let schema = create_test_schema();

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"{ concert(id: 1) { ...nope } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics[0].message, "Fragment \"nope\" is not defined");
        assert_eq!(diagnostics[0].rule, Some("KnownFragmentNames"));
    }

    #[test]
    fn inline_fragment_rejected() {
        let schema = create_test_schema();

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"{ concert(id: 1) { ... on Concert { id } } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Inline fragments are not supported"
        );
    }

    #[test]
    fn subscription_not_supported() {
        let schema = create_test_schema();

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"subscription { concert(id: 1) { id } }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Subscription operations are not supported"
        );
    }

    #[test]
    fn parse_error_reported_as_diagnostic() {
        let schema = create_test_schema();

        let diagnostics = DocumentValidator::new(&schema, None, None)
            .validate_str(r#"query {"#)
            .expect_err("expected a diagnostic");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("Syntax error"));
        assert_eq!(diagnostics[0].rule, None);
    }

    #[test]
    fn bound_array_for_enum_variable_reported() {
        let schema = create_test_schema();
        let mut variables = Map::new();
        variables.insert("mood".to_string(), Value::Array(vec![Value::Null]));

        // The array binds fine as JSON; the mismatch surfaces through the
        // type check at the usage site.
        let diagnostics = DocumentValidator::new(&schema, None, Some(variables))
            .validate_str(r#"query($mood: Mood!) { greet(mood: $mood) }"#)
            .expect_err("expected a diagnostic");

        assert_eq!(
            diagnostics[0].message,
            "Expected type \"Mood\", found [null]."
        );
    }

    fn mismatch(message: &str, locations: &[(usize, usize)]) -> Diagnostic {
        Diagnostic {
            message: message.to_string(),
            locations: locations
                .iter()
                .map(|(line, column)| Location {
                    line: *line,
                    column: *column,
                })
                .collect(),
            rule: Some(ARGUMENTS_OF_CORRECT_TYPE),
        }
    }

    fn create_variables(variables: &str) -> Map<String, Value> {
        serde_json::from_str(variables).unwrap()
    }

    fn create_test_schema() -> Schema {
        Schema::from_sdl(
            r#"
            type Query {
                greet(mood: Mood!): String
                leave(moods: [Mood]): String
                seat(rows: [[Mood]]): String
                pick(mood: Mood = CALM): String
                crash(why: String!): String
                vacuum(nothing: Nothing): String
                concert(id: Int!): Concert
            }

            enum Mood {
                HAPPY
                CALM
                GRUMPY
            }

            enum Nothing

            type Concert {
                id: Int
                title: String
                venue: Venue
            }

            type Venue {
                id: Int
                name: String
            }
        "#,
        )
        .unwrap()
    }
}
