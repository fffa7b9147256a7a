// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::OperationType;

use crate::field::ValidatedField;

/// The operation that survived validation: the hand-off point to whatever
/// executes it. Fragments are already inlined and variables already
/// substituted, so an executor needs no further access to the document.
#[derive(Debug)]
pub struct ValidatedOperation {
    /// The operation name, when the document declared one (or one was
    /// selected by `operationName`).
    pub name: Option<String>,
    /// Query or mutation; subscriptions never validate.
    pub typ: OperationType,
    /// The root-level selections, in source order.
    pub fields: Vec<ValidatedField>,
}
