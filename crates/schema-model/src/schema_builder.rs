// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::parse_schema;
use async_graphql_parser::types as sdl;
use indexmap::{IndexMap, IndexSet};

use crate::error::SchemaError;
use crate::schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema};
use crate::type_definition::{
    ArgumentDefinition, EnumType, FieldDefinition, ObjectType, ScalarType, TypeDefinition,
};
use crate::type_ref::TypeRef;

const BUILT_IN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Builds a [`Schema`] from SDL text.
///
/// All well-formedness checks live here: unknown or duplicate type names,
/// argument types that are not scalar/enum, and root-operation bindings are
/// rejected at build time so the validator never has to re-check them.
pub(crate) struct SchemaBuilder {
    type_definitions: IndexMap<String, TypeDefinition>,
    query_root: Option<String>,
    mutation_root: Option<String>,
}

impl SchemaBuilder {
    pub(crate) fn new() -> Self {
        let type_definitions = BUILT_IN_SCALARS
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    TypeDefinition::Scalar(ScalarType {
                        name: name.to_string(),
                        built_in: true,
                    }),
                )
            })
            .collect();

        Self {
            type_definitions,
            query_root: None,
            mutation_root: None,
        }
    }

    pub(crate) fn build(mut self, source: &str) -> Result<Schema, SchemaError> {
        let document =
            parse_schema(source).map_err(|err| SchemaError::Syntax(err.to_string()))?;

        for definition in document.definitions {
            match definition {
                sdl::TypeSystemDefinition::Schema(schema_def) => {
                    self.visit_schema_definition(&schema_def.node)?;
                }
                sdl::TypeSystemDefinition::Type(type_def) => {
                    self.visit_type_definition(&type_def.node)?;
                }
                // Directive definitions are parsed but play no role in
                // argument validation.
                sdl::TypeSystemDefinition::Directive(_) => {}
            }
        }

        let query_root = self.resolve_query_root()?;
        let mutation_root = self.resolve_mutation_root()?;
        self.check_references()?;

        Ok(Schema {
            type_definitions: self.type_definitions,
            query_root,
            mutation_root,
        })
    }

    fn visit_schema_definition(
        &mut self,
        schema_def: &sdl::SchemaDefinition,
    ) -> Result<(), SchemaError> {
        if let Some(subscription) = &schema_def.subscription {
            return Err(SchemaError::UnsupportedTypeKind {
                name: subscription.node.to_string(),
                kind: "subscription root",
            });
        }

        self.query_root = schema_def
            .query
            .as_ref()
            .map(|name| name.node.to_string())
            .or(self.query_root.take());
        self.mutation_root = schema_def
            .mutation
            .as_ref()
            .map(|name| name.node.to_string())
            .or(self.mutation_root.take());

        Ok(())
    }

    fn visit_type_definition(
        &mut self,
        type_def: &sdl::TypeDefinition,
    ) -> Result<(), SchemaError> {
        let name = type_def.name.node.to_string();

        if type_def.extend {
            return Err(SchemaError::UnsupportedExtension(name));
        }

        let definition = match &type_def.kind {
            sdl::TypeKind::Scalar => TypeDefinition::Scalar(ScalarType {
                name: name.clone(),
                built_in: false,
            }),
            sdl::TypeKind::Enum(enum_type) => {
                TypeDefinition::Enum(Self::build_enum(&name, enum_type)?)
            }
            sdl::TypeKind::Object(object_type) => {
                TypeDefinition::Object(Self::build_object(&name, object_type)?)
            }
            sdl::TypeKind::Interface(_) => {
                return Err(SchemaError::UnsupportedTypeKind {
                    name,
                    kind: "interface",
                });
            }
            sdl::TypeKind::Union(_) => {
                return Err(SchemaError::UnsupportedTypeKind {
                    name,
                    kind: "union",
                });
            }
            sdl::TypeKind::InputObject(_) => {
                return Err(SchemaError::UnsupportedTypeKind {
                    name,
                    kind: "input object",
                });
            }
        };

        if self.type_definitions.insert(name.clone(), definition).is_some() {
            return Err(SchemaError::DuplicateType(name));
        }

        Ok(())
    }

    fn build_enum(name: &str, enum_type: &sdl::EnumType) -> Result<EnumType, SchemaError> {
        let mut members = IndexSet::new();

        for value in &enum_type.values {
            let member = value.node.value.node.to_string();
            if !members.insert(member.clone()) {
                return Err(SchemaError::DuplicateEnumValue {
                    enum_name: name.to_string(),
                    value: member,
                });
            }
        }

        Ok(EnumType {
            name: name.to_string(),
            members,
        })
    }

    fn build_object(name: &str, object_type: &sdl::ObjectType) -> Result<ObjectType, SchemaError> {
        let mut fields = IndexMap::new();

        for field in &object_type.fields {
            let field_name = field.node.name.node.to_string();
            let mut arguments = IndexMap::new();

            for argument in &field.node.arguments {
                let argument_name = argument.node.name.node.to_string();
                arguments.insert(
                    argument_name.clone(),
                    ArgumentDefinition {
                        name: argument_name,
                        ty: (&argument.node.ty.node).into(),
                        default_value: argument
                            .node
                            .default_value
                            .as_ref()
                            .map(|value| value.node.clone()),
                    },
                );
            }

            fields.insert(
                field_name.clone(),
                FieldDefinition {
                    name: field_name,
                    ty: (&field.node.ty.node).into(),
                    arguments,
                },
            );
        }

        Ok(ObjectType {
            name: name.to_string(),
            fields,
        })
    }

    fn resolve_query_root(&self) -> Result<String, SchemaError> {
        let name = match &self.query_root {
            Some(name) => name.clone(),
            None if self.type_definitions.contains_key(QUERY_ROOT_TYPENAME) => {
                QUERY_ROOT_TYPENAME.to_string()
            }
            None => return Err(SchemaError::MissingQueryRoot),
        };

        self.check_root_type("query", &name)?;
        Ok(name)
    }

    fn resolve_mutation_root(&self) -> Result<Option<String>, SchemaError> {
        let name = match &self.mutation_root {
            Some(name) => name.clone(),
            None if self.type_definitions.contains_key(MUTATION_ROOT_TYPENAME) => {
                MUTATION_ROOT_TYPENAME.to_string()
            }
            None => return Ok(None),
        };

        self.check_root_type("mutation", &name)?;
        Ok(Some(name))
    }

    fn check_root_type(&self, operation: &'static str, name: &str) -> Result<(), SchemaError> {
        match self.type_definitions.get(name) {
            Some(TypeDefinition::Object(_)) => Ok(()),
            Some(_) => Err(SchemaError::InvalidRootType {
                operation,
                type_name: name.to_string(),
            }),
            None => Err(SchemaError::UnknownType {
                name: name.to_string(),
                referenced_by: format!("schema.{operation}"),
            }),
        }
    }

    /// Every field type must resolve, and every argument's leaf type must be
    /// a scalar or enum (input objects are not supported).
    fn check_references(&self) -> Result<(), SchemaError> {
        for type_def in self.type_definitions.values() {
            let Some(fields) = type_def.fields() else {
                continue;
            };

            for field in fields.values() {
                let referenced_by = format!("{}.{}", type_def.name(), field.name);
                self.resolve_leaf(&field.ty, &referenced_by)?;

                for argument in field.arguments.values() {
                    let leaf = self.resolve_leaf(&argument.ty, &referenced_by)?;
                    if let TypeDefinition::Object(object) = leaf {
                        return Err(SchemaError::NonInputArgumentType {
                            field: referenced_by,
                            argument: argument.name.clone(),
                            type_name: object.name.clone(),
                            kind: leaf.kind_name(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn resolve_leaf(
        &self,
        ty: &TypeRef,
        referenced_by: &str,
    ) -> Result<&TypeDefinition, SchemaError> {
        self.type_definitions
            .get(ty.leaf_name())
            .ok_or_else(|| SchemaError::UnknownType {
                name: ty.leaf_name().to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }
}
