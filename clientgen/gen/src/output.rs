//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces into one Rust file, validating the output, formatting
//! it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! A generated client is a single self-contained source file:
//!
//! ```text
//! //! module docs
//! retry transport          (RetryPolicy, RequestContext, execute_with_retries, ...)
//! ClientError
//! PaginatedResponse<T>
//! client struct            (constructors, auth, request helpers)
//! schema structs           (sorted by schema name)
//! impl Client { ... }      (one method per operation, sorted by path then method)
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes
//! - **Reproducibility**: Identical input yields byte-identical output

use std::fs;
use std::path::Path;

use clientgen_define::Document;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::{debug, info};

use crate::codegen::{
    LimitOffsetClassifier, ModuleDocBuilder, PaginationClassifier, generate_client_struct,
    generate_endpoint, generate_error_type, generate_paginated_response_type,
    generate_schema_structs, generate_transport,
};
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::naming::function_name;
use crate::validation::validate_document;

/// Returns the base URL baked into the client.
///
/// ## Resolution Order
///
/// 1. `config.base_url` (highest priority)
/// 2. The document's first server URL
/// 3. The empty string (callers use `with_base_url`)
fn resolve_base_url<'a>(doc: &'a Document, config: &'a GeneratorConfig) -> &'a str {
    config
        .base_url
        .as_deref()
        .or_else(|| doc.base_url())
        .unwrap_or("")
}

/// Assembles the complete client file.
///
/// Pieces are emitted in a fixed order: header docs, retry transport,
/// scaffolding (`ClientError`, `PaginatedResponse`, client struct), schema
/// structs, then one `impl` block holding every endpoint method. Every
/// operation is emitted exactly once.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the embedded transport cannot
/// be parsed.
pub fn assemble_client(
    doc: &Document,
    config: &GeneratorConfig,
    classifier: &dyn PaginationClassifier,
) -> Result<TokenStream, GeneratorError> {
    let module_docs = ModuleDocBuilder::new(doc, config, classifier).build();
    let transport = generate_transport()?;
    let error_type = generate_error_type();
    let paginated_type = generate_paginated_response_type();
    let client_struct = generate_client_struct(config, resolve_base_url(doc, config));
    let schema_structs = generate_schema_structs(doc);

    let endpoints: Vec<TokenStream> = doc
        .operations()
        .map(|(path, method, operation)| {
            let name = function_name(method, path);
            generate_endpoint(&name, path, method, operation, classifier)
        })
        .collect();

    debug!(
        schemas = doc.schemas().len(),
        endpoints = endpoints.len(),
        "assembled client"
    );

    let endpoint_impl = if endpoints.is_empty() {
        quote! {}
    } else {
        let client_name = format_ident!("{}", config.client_name);
        quote! {
            impl #client_name {
                #(#endpoints)*
            }
        }
    };

    Ok(quote! {
        #module_docs

        #transport

        #error_type

        #paginated_type

        #client_struct

        #schema_structs

        #endpoint_impl
    })
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's
/// syntactically valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Converts a parsed syn::File back to a formatted string, prepending an
/// auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by clientgen-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Generates a client with a custom pagination classifier.
///
/// ## Errors
///
/// Returns validation errors for the document or settings, and
/// `GeneratorError::CodeGenError` if the assembled code is not valid Rust.
pub fn generate_client_with(
    doc: &Document,
    config: &GeneratorConfig,
    classifier: &dyn PaginationClassifier,
) -> Result<String, GeneratorError> {
    validate_document(doc, config)?;
    let tokens = assemble_client(doc, config, classifier)?;
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Generates the formatted client source for `doc`.
///
/// Uses [`LimitOffsetClassifier`] to pick paginated operations.
///
/// ## Examples
///
/// ```
/// use clientgen_define::{Document, HttpMethod, Operation, PathItem, Schema};
/// use clientgen_gen::config::GeneratorConfig;
/// use clientgen_gen::output::generate_client;
///
/// let doc = Document::new()
///     .with_schema("Item", Schema::object().with_property("id", Schema::integer()))
///     .with_path("/items", PathItem::new().with_operation(HttpMethod::Get, Operation::new()));
///
/// let code = generate_client(&doc, &GeneratorConfig::default()).unwrap();
/// assert!(code.contains("pub struct Item"));
/// assert!(code.contains("pub async fn get_items"));
/// ```
///
/// ## Errors
///
/// See [`generate_client_with`].
pub fn generate_client(doc: &Document, config: &GeneratorConfig) -> Result<String, GeneratorError> {
    generate_client_with(doc, config, &LimitOffsetClassifier)
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates the client and writes it to `output_file`.
///
/// ## Arguments
///
/// * `doc` - The API document to generate code for
/// * `config` - Generation settings
/// * `output_file` - Destination of the generated source file
/// * `dry_run` - If true, print code instead of writing it
///
/// ## Returns
///
/// The formatted code (useful for dry-run mode or testing).
///
/// ## Errors
///
/// Returns an error if:
/// - The document or settings fail validation
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    doc: &Document,
    config: &GeneratorConfig,
    output_file: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let code = generate_client(doc, config)?;

    if dry_run {
        println!("=== {} ===\n{}\n", output_file.display(), code);
    } else {
        write_atomic(output_file, &code)?;
        info!(path = %output_file.display(), bytes = code.len(), "wrote generated client");
    }

    Ok(code)
}
