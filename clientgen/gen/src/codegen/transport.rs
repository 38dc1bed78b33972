//! Embedding of the runtime retry transport.
//!
//! Generated clients do not depend on the `clientgen` crate. Instead, the
//! source of `clientgen::transport` is parsed and its items are copied into
//! the output, without the module's inner docs and test module. Generated
//! code and the runtime's tests therefore exercise the same implementation.

use clientgen::TRANSPORT_SOURCE;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Item};

use crate::errors::GeneratorError;

/// Returns the transport's items as tokens.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the embedded source fails to
/// parse, which would indicate a broken build of the runtime crate.
pub fn generate_transport() -> Result<TokenStream, GeneratorError> {
    let file = syn::parse_file(TRANSPORT_SOURCE).map_err(|e| {
        GeneratorError::CodeGenError(format!("failed to parse embedded transport: {e}"))
    })?;

    let items = file.items.into_iter().filter(|item| !is_test_module(item));

    Ok(quote! { #(#items)* })
}

fn is_test_module(item: &Item) -> bool {
    matches!(item, Item::Mod(module) if module.attrs.iter().any(is_cfg_test))
}

fn is_cfg_test(attr: &Attribute) -> bool {
    attr.path().is_ident("cfg")
        && attr
            .parse_args::<syn::Ident>()
            .is_ok_and(|ident| ident == "test")
}
