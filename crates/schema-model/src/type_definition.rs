// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;
use indexmap::{IndexMap, IndexSet};

use crate::type_ref::TypeRef;

/// A named type registered in the schema.
///
/// Objects exist so that the registry can answer "what is the type of
/// argument `a` of field `f`"; they are never themselves valid argument
/// types (the schema builder enforces that argument leaf types are scalars
/// or enums).
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::Enum(enum_type) => &enum_type.name,
            TypeDefinition::Object(object) => &object.name,
        }
    }

    /// The fields of this type, if it is an object type.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDefinition>> {
        match self {
            TypeDefinition::Object(object) => Some(&object.fields),
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::Object(_) => "object",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarType {
    pub name: String,
    /// One of the five built-in scalars (`Int`, `Float`, `String`,
    /// `Boolean`, `ID`). Custom scalars accept any literal kind; built-ins
    /// constrain the literal kinds they accept.
    pub built_in: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    /// Case-sensitive member names, in declaration order. May be empty, in
    /// which case no literal is ever valid for this type.
    pub members: IndexSet<String>,
}

impl EnumType {
    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: IndexMap<String, FieldDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: IndexMap<String, ArgumentDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<ConstValue>,
}
