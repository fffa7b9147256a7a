// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

/// A structural failure that stops validation outright, as opposed to the
/// accumulated argument-type diagnostics (see
/// [`Diagnostic`](crate::Diagnostic)).
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    QueryParsingFailed(String, Pos, Option<Pos>),

    #[error("Variable \"${0}\" is not defined")]
    VariableNotFound(String, Pos),

    #[error("Variable \"${0}\" could not be deserialized: {2}")]
    MalformedVariable(String, Pos, serde_json::Error),

    #[error("Fragment \"{0}\" is not defined")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Fragment \"{0}\" cannot spread within itself")]
    FragmentCycle(String, Pos),

    #[error("Inline fragments are not supported")]
    InlineFragmentNotSupported(Pos),

    #[error("Field \"{0}\" is not valid for type \"{1}\"")]
    InvalidField(String, String, Pos),

    #[error("Field type \"{0}\" is not valid")]
    InvalidFieldType(String, Pos),

    #[error("Field \"{0}\" is of a scalar type, which should not specify fields")]
    ScalarWithField(String, Pos),

    #[error("Argument \"{0}\" of required type \"{1}\" was not provided")]
    RequiredArgumentNotFound(String, String, Pos),

    #[error("Argument(s) {0:?} invalid for \"{1}\"")]
    StrayArguments(Vec<String>, String, Pos),

    #[error("Subscription operations are not supported")]
    SubscriptionNotSupported,

    #[error("No operation found")]
    NoOperationFound,

    #[error("Operation root type \"{0}\" is not defined")]
    OperationNotFound(String),

    #[error("Must provide operation name if query contains multiple operations")]
    MultipleOperationsNoOperationName,

    #[error("operationName \"{0}\" doesn't match any operation")]
    MultipleOperationsUnmatchedOperationName(String),
}

impl ValidationError {
    pub fn position1(&self) -> Pos {
        match self {
            ValidationError::QueryParsingFailed(_, pos, _) => *pos,
            ValidationError::VariableNotFound(_, pos) => *pos,
            ValidationError::MalformedVariable(_, pos, _) => *pos,
            ValidationError::FragmentDefinitionNotFound(_, pos) => *pos,
            ValidationError::FragmentCycle(_, pos) => *pos,
            ValidationError::InlineFragmentNotSupported(pos) => *pos,
            ValidationError::InvalidField(_, _, pos) => *pos,
            ValidationError::InvalidFieldType(_, pos) => *pos,
            ValidationError::ScalarWithField(_, pos) => *pos,
            ValidationError::RequiredArgumentNotFound(_, _, pos) => *pos,
            ValidationError::StrayArguments(_, _, pos) => *pos,
            ValidationError::SubscriptionNotSupported
            | ValidationError::NoOperationFound
            | ValidationError::OperationNotFound(_)
            | ValidationError::MultipleOperationsNoOperationName
            | ValidationError::MultipleOperationsUnmatchedOperationName(_) => Pos::default(),
        }
    }

    pub fn position2(&self) -> Option<Pos> {
        match self {
            ValidationError::QueryParsingFailed(_, _, pos) => *pos,
            _ => None,
        }
    }

    pub fn positions(&self) -> Vec<Pos> {
        std::iter::once(self.position1())
            .chain(self.position2())
            .collect()
    }

    /// The validation-rule identifier reported on the wire, where one
    /// applies.
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidField(..) => Some("FieldsOnCorrectType"),
            ValidationError::ScalarWithField(..) => Some("ScalarLeafs"),
            ValidationError::RequiredArgumentNotFound(..) => Some("ProvidedNonNullArguments"),
            ValidationError::StrayArguments(..) => Some("KnownArgumentNames"),
            ValidationError::VariableNotFound(..) => Some("NoUndefinedVariables"),
            ValidationError::FragmentDefinitionNotFound(..) => Some("KnownFragmentNames"),
            ValidationError::FragmentCycle(..) => Some("NoFragmentCycles"),
            _ => None,
        }
    }
}
