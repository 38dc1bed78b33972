//! Struct generation for named schemas.
//!
//! Each entry in `components.schemas` becomes one `pub struct` whose fields
//! mirror the schema's properties. Field types come from
//! [`map_type`](super::types::map_type); the original property name is kept
//! on the wire via `#[serde(rename)]`.

use clientgen_define::{Document, Schema};
use proc_macro2::TokenStream;
use quote::quote;
use tracing::debug;

use super::types::map_type;
use crate::naming::{field_ident, type_ident};

/// Generates the struct for a single named schema.
///
/// ## Examples
///
/// ```ignore
/// // Schema "Pet" with properties {name: string, age: integer} generates:
/// #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// pub struct Pet {
///     #[serde(rename = "age")]
///     pub age: i64,
///     #[serde(rename = "name")]
///     pub name: String,
/// }
/// ```
pub fn generate_schema_struct(name: &str, schema: &Schema) -> TokenStream {
    let struct_name = type_ident(name);
    let doc = format!("Generated from schema `{name}`.");

    let fields = schema.properties.iter().map(|(property, property_schema)| {
        let ident = field_ident(property);
        let ty = map_type(Some(property_schema));
        quote! {
            #[serde(rename = #property)]
            pub #ident: #ty,
        }
    });

    debug!(
        schema = name,
        fields = schema.properties.len(),
        "generated schema struct"
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct #struct_name {
            #(#fields)*
        }
    }
}

/// Generates one struct per named schema, in sorted schema-name order.
pub fn generate_schema_structs(doc: &Document) -> TokenStream {
    doc.schemas()
        .iter()
        .map(|(name, schema)| generate_schema_struct(name, schema))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::format_generated_code;

    fn format(tokens: TokenStream) -> String {
        format_generated_code(&tokens).expect("generated struct should be valid Rust")
    }

    #[test]
    fn fields_use_mapped_types() {
        let schema = Schema::object()
            .with_property("name", Schema::string())
            .with_property("age", Schema::integer())
            .with_property("tags", Schema::array(Schema::string()));

        let code = format(generate_schema_struct("Pet", &schema));

        assert!(code.contains("pub struct Pet"));
        assert!(code.contains("pub name: String"));
        assert!(code.contains("pub age: i64"));
        assert!(code.contains("pub tags: Vec<String>"));
        assert!(code.contains("#[serde(rename = \"age\")]"));
        assert!(code.contains("serde::Serialize"));
        assert!(code.contains("serde::Deserialize"));
    }

    #[test]
    fn fields_are_sorted_by_property_name() {
        let schema = Schema::object()
            .with_property("zeta", Schema::string())
            .with_property("alpha", Schema::string());

        let code = format(generate_schema_struct("Item", &schema));
        let alpha = code.find("pub alpha").unwrap();
        let zeta = code.find("pub zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn property_names_are_sanitized_and_renamed() {
        let schema = Schema::object()
            .with_property("createdAt", Schema::string())
            .with_property("type", Schema::string());

        let code = format(generate_schema_struct("event_log", &schema));

        assert!(code.contains("pub struct EventLog"));
        assert!(code.contains("pub created_at: String"));
        assert!(code.contains("#[serde(rename = \"createdAt\")]"));
        assert!(code.contains("pub r#type: String"));
        assert!(code.contains("#[serde(rename = \"type\")]"));
    }

    #[test]
    fn nested_object_property_is_untyped_map() {
        let schema = Schema::object()
            .with_property("owner", Schema::object().with_property("id", Schema::integer()));

        let code = format(generate_schema_struct("Pet", &schema));
        assert!(code.contains("pub owner: serde_json::Map<String, serde_json::Value>"));
        assert!(!code.contains("pub id"));
    }

    #[test]
    fn schema_without_properties_is_empty_struct() {
        let code = format(generate_schema_struct("Empty", &Schema::object()));
        assert!(code.contains("pub struct Empty {}"));
    }

    #[test]
    fn one_struct_per_schema_in_sorted_order() {
        let doc = Document::new()
            .with_schema("Zebra", Schema::object())
            .with_schema("Apple", Schema::object());

        let code = format(generate_schema_structs(&doc));
        assert_eq!(code.matches("pub struct").count(), 2);
        assert!(code.find("pub struct Apple").unwrap() < code.find("pub struct Zebra").unwrap());
    }

    #[test]
    fn empty_document_generates_nothing() {
        assert!(generate_schema_structs(&Document::new()).is_empty());
    }
}
