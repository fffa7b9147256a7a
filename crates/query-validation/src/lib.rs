// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validates GraphQL query documents against a [`Schema`](schema_model::Schema).
//!
//! The entry point is [`DocumentValidator`]: given a schema, an optional
//! operation name, and an optional JSON variable map, it checks one
//! operation of a document and returns either the normalized
//! [`ValidatedOperation`] or every [`Diagnostic`] found. Argument values of
//! the wrong type accumulate (all of them are reported, in source order);
//! structural problems such as unknown fields or missing required arguments
//! stop validation at the first occurrence.

mod arguments_validator;
mod diagnostic;
mod document_validator;
mod field;
mod operation;
mod operation_validator;
mod selection_set_validator;
mod validation_error;

pub use diagnostic::{ARGUMENTS_OF_CORRECT_TYPE, Diagnostic, ErrorConvention, Location};
pub use document_validator::DocumentValidator;
pub use field::ValidatedField;
pub use operation::ValidatedOperation;
pub use validation_error::ValidationError;
