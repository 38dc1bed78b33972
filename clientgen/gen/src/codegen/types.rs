//! Schema to Rust type mapping.
//!
//! The mapping is deliberately shallow: objects become untyped JSON maps
//! rather than nested structs, and array elements are mapped with the
//! scalar-only [`map_scalar`], so arrays of objects or arrays become
//! `Vec<serde_json::Value>`.

use std::fmt;

use clientgen_define::{Schema, SchemaKind};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// A Rust type expression produced for a schema node.
///
/// ## Examples
///
/// ```
/// use clientgen_define::Schema;
/// use clientgen_gen::codegen::types::{TypeExpr, map_type};
///
/// assert_eq!(map_type(Some(&Schema::integer())), TypeExpr::Integer);
/// assert_eq!(
///     map_type(Some(&Schema::array(Schema::string()))).to_string(),
///     "Vec<String>"
/// );
/// assert_eq!(map_type(None).to_string(), "serde_json::Value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `serde_json::Value`, the fallback for anything unmapped.
    Any,
    /// `serde_json::Map<String, serde_json::Value>`.
    AnyMap,
    /// `String`.
    String,
    /// `i64`.
    Integer,
    /// `bool`.
    Boolean,
    /// `Vec<T>`.
    Sequence(Box<TypeExpr>),
}

impl ToTokens for TypeExpr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expr = match self {
            Self::Any => quote! { serde_json::Value },
            Self::AnyMap => quote! { serde_json::Map<String, serde_json::Value> },
            Self::String => quote! { String },
            Self::Integer => quote! { i64 },
            Self::Boolean => quote! { bool },
            Self::Sequence(inner) => quote! { Vec<#inner> },
        };
        tokens.extend(expr);
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("serde_json::Value"),
            Self::AnyMap => f.write_str("serde_json::Map<String, serde_json::Value>"),
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("i64"),
            Self::Boolean => f.write_str("bool"),
            Self::Sequence(inner) => write!(f, "Vec<{inner}>"),
        }
    }
}

/// Maps a schema node to its Rust type.
///
/// Total: every input, including a missing schema, yields exactly one
/// expression.
pub fn map_type(schema: Option<&Schema>) -> TypeExpr {
    let Some(schema) = schema else {
        return TypeExpr::Any;
    };

    match schema.kind {
        Some(SchemaKind::Object) => TypeExpr::AnyMap,
        Some(SchemaKind::Array) => {
            TypeExpr::Sequence(Box::new(map_scalar(schema.items.as_deref())))
        }
        Some(SchemaKind::String) => TypeExpr::String,
        Some(SchemaKind::Integer) => TypeExpr::Integer,
        Some(SchemaKind::Boolean) => TypeExpr::Boolean,
        Some(SchemaKind::Number | SchemaKind::Other) | None => TypeExpr::Any,
    }
}

/// Maps an array element schema.
///
/// Only the three primitives are recognized; nested arrays, objects and
/// missing `items` all fall back to [`TypeExpr::Any`].
pub fn map_scalar(schema: Option<&Schema>) -> TypeExpr {
    match schema.and_then(|s| s.kind) {
        Some(SchemaKind::String) => TypeExpr::String,
        Some(SchemaKind::Integer) => TypeExpr::Integer,
        Some(SchemaKind::Boolean) => TypeExpr::Boolean,
        _ => TypeExpr::Any,
    }
}
