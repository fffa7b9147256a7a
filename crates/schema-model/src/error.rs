// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// A schema that fails to build is rejected here, before any query
/// validation runs; the validator may therefore assume every type reference
/// it encounters resolves.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("duplicate definition of type \"{0}\"")]
    DuplicateType(String),

    #[error("duplicate value \"{value}\" on enum \"{enum_name}\"")]
    DuplicateEnumValue { enum_name: String, value: String },

    #[error("unknown type \"{name}\" referenced by \"{referenced_by}\"")]
    UnknownType {
        name: String,
        referenced_by: String,
    },

    #[error("{kind} types are not supported (type \"{name}\")")]
    UnsupportedTypeKind { name: String, kind: &'static str },

    #[error("type extensions are not supported (type \"{0}\")")]
    UnsupportedExtension(String),

    #[error(
        "argument \"{argument}\" of \"{field}\" must be of scalar or enum type, not {kind} type \"{type_name}\""
    )]
    NonInputArgumentType {
        field: String,
        argument: String,
        type_name: String,
        kind: &'static str,
    },

    #[error("root {operation} type \"{type_name}\" is not an object type")]
    InvalidRootType {
        operation: &'static str,
        type_name: String,
    },

    #[error("schema does not define a query root type")]
    MissingQueryRoot,
}
