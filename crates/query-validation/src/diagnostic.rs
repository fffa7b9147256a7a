// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use async_graphql_value::Value;
use serde::Serialize;

use crate::validation_error::ValidationError;

pub const ARGUMENTS_OF_CORRECT_TYPE: &str = "ArgumentsOfCorrectType";

/// A 1-based source position as reported on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    #[serde(rename = "Line")]
    pub line: usize,
    #[serde(rename = "Column")]
    pub column: usize,
}

impl From<Pos> for Location {
    fn from(pos: Pos) -> Self {
        Location {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// The wire-level validation finding. Field names and ordering are part of
/// the external contract and must not change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(rename = "Message")]
    pub message: String,
    /// One location for literal-sourced findings, two (declaration then
    /// usage) for variable-sourced findings under the two-location
    /// convention.
    #[serde(rename = "Locations")]
    pub locations: Vec<Location>,
    #[serde(rename = "Rule", skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl From<ValidationError> for Diagnostic {
    fn from(error: ValidationError) -> Self {
        Diagnostic {
            message: error.to_string(),
            locations: error.positions().into_iter().map(Into::into).collect(),
            rule: error.rule(),
        }
    }
}

/// How variable-sourced type mismatches are worded and located.
///
/// This is a formatting strategy selected once per validator; the matching
/// algorithm is identical under both conventions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorConvention {
    /// `Argument "x" has invalid value $var.` with the usage site as the
    /// only location. Kept for clients pinned to the older wording.
    Legacy,
    /// No argument prefix; the variable's declaration and usage sites as two
    /// locations.
    #[default]
    TwoLocation,
}

/// Where a mismatch's value came from, which decides its message prefix and
/// location set.
#[derive(Clone, Debug)]
pub(crate) enum MismatchSource {
    Literal,
    Variable {
        name: String,
        declaration: Pos,
        usage: Pos,
    },
}

/// A structured finding from the value matcher, not yet worded for the
/// wire. `detail` carries the `Expected type …` sentence with any
/// `In element #i: ` prefixes already composed (outermost first).
#[derive(Debug)]
pub(crate) struct TypeMismatch {
    pub(crate) detail: String,
    pub(crate) pos: Pos,
    pub(crate) source: MismatchSource,
}

impl TypeMismatch {
    pub(crate) fn into_diagnostic(
        self,
        convention: ErrorConvention,
        argument_name: &str,
        outer_value: &Value,
    ) -> Diagnostic {
        let (message, locations) = match (&self.source, convention) {
            (MismatchSource::Literal, _) => (
                format!(
                    "Argument \"{argument_name}\" has invalid value {}.\n{}",
                    render_value(outer_value),
                    self.detail,
                ),
                vec![self.pos.into()],
            ),
            (
                MismatchSource::Variable {
                    declaration, usage, ..
                },
                ErrorConvention::TwoLocation,
            ) => (self.detail, vec![(*declaration).into(), (*usage).into()]),
            (MismatchSource::Variable { name, usage, .. }, ErrorConvention::Legacy) => (
                format!(
                    "Argument \"{argument_name}\" has invalid value ${name}.\n{}",
                    self.detail,
                ),
                vec![(*usage).into()],
            ),
        };

        Diagnostic {
            message,
            locations,
            rule: Some(ARGUMENTS_OF_CORRECT_TYPE),
        }
    }
}

/// Renders a value the way it reads in query text: enum literals bare,
/// strings quoted, lists bracketed with comma-space separators, variables
/// with their `$` sigil.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Variable(name) => format!("${name}"),
        Value::Null => "null".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => render_string(text),
        Value::Boolean(b) => b.to_string(),
        Value::Enum(name) => name.to_string(),
        Value::Binary(_) => "<binary>".to_string(),
        Value::List(items) => {
            let items = items.iter().map(render_value).collect::<Vec<_>>();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields = fields
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_value(value)))
                .collect::<Vec<_>>();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

fn render_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
