//! Code generation modules for clientgen.
//!
//! This module contains generators that produce Rust source code from an
//! API document. Each submodule handles a specific component of the
//! generated client.
//!
//! ## Submodules
//!
//! - [`types`] - Maps schema nodes to Rust type expressions
//! - [`structs`] - Generates one struct per named schema
//! - [`pagination`] - Decides which operations get the paginated shape
//! - [`endpoint`] - Generates one async method per operation
//! - [`transport`] - Embeds the runtime retry transport
//! - [`error`] - Generates `ClientError` and `PaginatedResponse<T>`
//! - [`client`] - Generates the client struct and its request helpers
//! - [`module_docs`] - Generates the file's `//!` header
//!
//! ## Code Generation Flow
//!
//! 1. The header is built via [`ModuleDocBuilder`]
//! 2. The transport is embedded via [`generate_transport`]
//! 3. Scaffolding comes from [`generate_error_type`],
//!    [`generate_paginated_response_type`] and [`generate_client_struct`]
//! 4. Each schema gets a struct via [`generate_schema_structs`]
//! 5. Each operation gets a method via [`generate_endpoint`]
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod module_docs;
pub mod pagination;
pub mod structs;
pub mod transport;
pub mod types;

use proc_macro2::TokenStream;

pub use client::generate_client_struct;
pub use endpoint::{
    generate_endpoint, generate_head_endpoint, generate_paginated_endpoint,
    generate_plain_endpoint,
};
pub use error::{generate_error_type, generate_paginated_response_type};
pub use module_docs::ModuleDocBuilder;
pub use pagination::{LimitOffsetClassifier, PaginationClassifier, is_paginated};
pub use structs::{generate_schema_struct, generate_schema_structs};
pub use transport::generate_transport;
pub use types::{TypeExpr, map_scalar, map_type};

/// Formats a generated fragment using prettyplease.
///
/// Used to inspect individual generators' output; full files go through
/// [`crate::output::validate_code`] and [`crate::output::format_code`].
///
/// ## Errors
///
/// Returns an error string if the tokens do not parse as a Rust file.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}
