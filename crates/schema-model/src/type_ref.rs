// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{BaseType, Type};

/// A possibly-wrapped reference to a named type, as written in a field,
/// argument, or variable declaration (`Mood`, `[Mood]`, `Mood!`, `[Mood!]!`).
///
/// `NonNull` never directly wraps another `NonNull`; the only constructor is
/// the conversion from the parser's [`Type`], which keeps nullability as a
/// flag beside the base type and therefore cannot produce a double wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The name at the bottom of the reference, after stripping every
    /// `List`/`NonNull` wrapper.
    pub fn leaf_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) => inner.leaf_name(),
            TypeRef::NonNull(inner) => inner.leaf_name(),
        }
    }

    pub fn nullable(&self) -> bool {
        !matches!(self, TypeRef::NonNull(_))
    }
}

impl From<&Type> for TypeRef {
    fn from(ty: &Type) -> Self {
        let base = match &ty.base {
            BaseType::Named(name) => TypeRef::Named(name.to_string()),
            BaseType::List(inner) => TypeRef::List(Box::new(inner.as_ref().into())),
        };

        if ty.nullable {
            base
        } else {
            TypeRef::NonNull(Box::new(base))
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TypeRef {
        (&Type::new(s).unwrap()).into()
    }

    #[test]
    fn conversion_keeps_wrapper_shape() {
        assert_eq!(parse("Mood"), TypeRef::Named("Mood".to_string()));
        assert_eq!(
            parse("Mood!"),
            TypeRef::NonNull(Box::new(TypeRef::Named("Mood".to_string())))
        );
        assert_eq!(
            parse("[Mood]"),
            TypeRef::List(Box::new(TypeRef::Named("Mood".to_string())))
        );
        assert_eq!(
            parse("[Mood!]!"),
            TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::NonNull(
                Box::new(TypeRef::Named("Mood".to_string()))
            )))))
        );
    }

    #[test]
    fn display_round_trips_source_syntax() {
        for s in ["Mood", "Mood!", "[Mood]", "[Mood!]", "[Mood!]!", "[[Int]]"] {
            assert_eq!(parse(s).to_string(), s);
        }
    }

    #[test]
    fn leaf_name_strips_all_wrappers() {
        assert_eq!(parse("[[Mood!]!]!").leaf_name(), "Mood");
        assert_eq!(parse("Int").leaf_name(), "Int");
    }

    #[test]
    fn nullability_is_outermost_only() {
        assert!(parse("[Mood!]").nullable());
        assert!(!parse("[Mood]!").nullable());
    }
}
