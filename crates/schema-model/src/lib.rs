// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The type registry consulted during query validation: type definitions,
//! type references, and the schema built from SDL text.
//!
//! Everything here is immutable once [`Schema::from_sdl`] returns, so a
//! `&Schema` can be shared freely across concurrent validations.

mod error;
mod schema;
mod schema_builder;
mod type_definition;
mod type_ref;

pub use error::SchemaError;
pub use schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema};
pub use type_definition::{
    ArgumentDefinition, EnumType, FieldDefinition, ObjectType, ScalarType, TypeDefinition,
};
pub use type_ref::TypeRef;
