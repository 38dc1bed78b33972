//! Pagination detection for operations.
//!
//! The endpoint generator asks a [`PaginationClassifier`] whether an
//! operation should get the paginated method shape. The default
//! [`LimitOffsetClassifier`] only looks at parameter names.

use clientgen_define::Operation;

/// Decides whether an operation is paginated.
pub trait PaginationClassifier {
    /// Returns `true` if the operation should be generated with explicit
    /// `limit`/`offset` arguments.
    fn is_paginated(&self, operation: &Operation) -> bool;
}

/// Treats an operation as paginated when any of its parameters is named
/// exactly `limit` or `offset`.
///
/// The match is case-sensitive and ignores the parameter location, so a
/// header named `limit` counts too.
///
/// ## Examples
///
/// ```
/// use clientgen_define::{Operation, Parameter};
/// use clientgen_gen::codegen::pagination::{LimitOffsetClassifier, PaginationClassifier};
///
/// let op = Operation::new().with_parameter(Parameter::query("offset"));
/// assert!(LimitOffsetClassifier.is_paginated(&op));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitOffsetClassifier;

impl PaginationClassifier for LimitOffsetClassifier {
    fn is_paginated(&self, operation: &Operation) -> bool {
        is_paginated(operation)
    }
}

/// The [`LimitOffsetClassifier`] rule as a free function.
pub fn is_paginated(operation: &Operation) -> bool {
    operation
        .parameters
        .iter()
        .any(|p| p.name == "limit" || p.name == "offset")
}
