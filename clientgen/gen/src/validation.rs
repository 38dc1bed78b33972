//! Pre-generation checks for API documents.
//!
//! Catches inputs that would otherwise produce Rust that does not compile:
//! operations whose method names collide after sanitization, schemas or
//! properties that map to the same identifier, and schemas that shadow
//! types the generated file defines or relies on.
//!
//! ## Examples
//!
//! ```
//! use clientgen_define::{Document, Schema};
//! use clientgen_gen::config::GeneratorConfig;
//! use clientgen_gen::validation::validate_document;
//!
//! let doc = Document::new().with_schema("Pet", Schema::object());
//! assert!(validate_document(&doc, &GeneratorConfig::default()).is_ok());
//! ```

use std::collections::HashMap;

use clientgen_define::Document;

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::naming::{field_ident, function_name, type_name};

/// Type names defined by the generated scaffolding or used unqualified in it.
pub(crate) const RESERVED_TYPE_NAMES: &[&str] = &[
    "ClientError",
    "PaginatedResponse",
    "RequestContext",
    "RetryPolicy",
    "TransportError",
    "Duration",
    "Box",
    "Default",
    "Option",
    "Result",
    "Self",
    "String",
    "Vec",
];

/// Validates a document and generation settings before code generation.
///
/// ## Errors
///
/// - `GeneratorError::ConfigError` if `config` is invalid
/// - `GeneratorError::ReservedTypeName` if a schema's type name is reserved
///   or equals the client name
/// - `GeneratorError::DuplicateTypeName` if two schemas map to one type name
/// - `GeneratorError::DuplicateFieldName` if two properties of one schema
///   map to one field name
/// - `GeneratorError::NamingCollision` if two operations map to one method
pub fn validate_document(doc: &Document, config: &GeneratorConfig) -> Result<(), GeneratorError> {
    config.validate()?;
    validate_type_names(doc, config)?;
    validate_field_names(doc)?;
    validate_function_names(doc)?;
    Ok(())
}

fn validate_type_names(doc: &Document, config: &GeneratorConfig) -> Result<(), GeneratorError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for schema_name in doc.schemas().keys() {
        let generated = type_name(schema_name);

        if generated == config.client_name || RESERVED_TYPE_NAMES.contains(&generated.as_str()) {
            return Err(GeneratorError::ReservedTypeName {
                schema: schema_name.clone(),
                type_name: generated,
            });
        }

        if let Some(first) = seen.get(&generated) {
            return Err(GeneratorError::DuplicateTypeName {
                type_name: generated,
                first: (*first).to_string(),
                second: schema_name.clone(),
            });
        }
        seen.insert(generated, schema_name);
    }

    Ok(())
}

fn validate_field_names(doc: &Document) -> Result<(), GeneratorError> {
    for (schema_name, schema) in doc.schemas() {
        let mut seen: HashMap<String, &str> = HashMap::new();

        for property in schema.properties.keys() {
            let field = field_ident(property).to_string();
            if let Some(first) = seen.get(&field) {
                return Err(GeneratorError::DuplicateFieldName {
                    schema: schema_name.clone(),
                    field,
                    first: (*first).to_string(),
                    second: property.clone(),
                });
            }
            seen.insert(field, property);
        }
    }

    Ok(())
}

fn validate_function_names(doc: &Document) -> Result<(), GeneratorError> {
    let mut seen: HashMap<String, String> = HashMap::new();

    for (path, method, _) in doc.operations() {
        let function = function_name(method, path);
        let label = format!("{method} {path}");

        if let Some(first) = seen.get(&function) {
            return Err(GeneratorError::NamingCollision {
                function,
                first: first.clone(),
                second: label,
            });
        }
        seen.insert(function, label);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clientgen_define::{HttpMethod, Operation, PathItem, Schema};

    use super::*;

    fn get(doc: Document, path: &str) -> Document {
        doc.with_path(path, PathItem::new().with_operation(HttpMethod::Get, Operation::new()))
    }

    #[test]
    fn empty_document_is_valid() {
        assert!(validate_document(&Document::new(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn distinct_methods_on_one_path_are_fine() {
        let doc = Document::new().with_path(
            "/items",
            PathItem::new()
                .with_operation(HttpMethod::Get, Operation::new())
                .with_operation(HttpMethod::Post, Operation::new()),
        );
        assert!(validate_document(&doc, &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn detects_function_name_collision() {
        let doc = get(get(Document::new(), "/user-list"), "/user_list");

        let err = validate_document(&doc, &GeneratorConfig::default()).unwrap_err();
        match err {
            GeneratorError::NamingCollision {
                function,
                first,
                second,
            } => {
                assert_eq!(function, "get_user_list");
                // Paths iterate in sorted order: '-' sorts before '_'.
                assert_eq!(first, "GET /user-list");
                assert_eq!(second, "GET /user_list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn detects_duplicate_type_names() {
        let doc = Document::new()
            .with_schema("pet_store", Schema::object())
            .with_schema("PetStore", Schema::object());

        let err = validate_document(&doc, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateTypeName { ref type_name, .. } if type_name == "PetStore"));
    }

    #[test]
    fn detects_duplicate_field_names() {
        let doc = Document::new().with_schema(
            "User",
            Schema::object()
                .with_property("userName", Schema::string())
                .with_property("user_name", Schema::string()),
        );

        let err = validate_document(&doc, &GeneratorConfig::default()).unwrap_err();
        match err {
            GeneratorError::DuplicateFieldName { schema, field, .. } => {
                assert_eq!(schema, "User");
                assert_eq!(field, "user_name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_reserved_type_names() {
        for name in ["ClientError", "paginated_response", "String", "self"] {
            let doc = Document::new().with_schema(name, Schema::object());
            let err = validate_document(&doc, &GeneratorConfig::default()).unwrap_err();
            assert!(
                matches!(err, GeneratorError::ReservedTypeName { .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn rejects_schema_named_like_client() {
        let doc = Document::new().with_schema("PetStore", Schema::object());
        let config = GeneratorConfig::default().with_client_name("PetStore");

        assert!(matches!(
            validate_document(&doc, &config),
            Err(GeneratorError::ReservedTypeName { .. })
        ));
        assert!(validate_document(&doc, &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn invalid_config_is_reported_first() {
        let config = GeneratorConfig::default().with_max_attempts(0);
        assert!(matches!(
            validate_document(&Document::new(), &config),
            Err(GeneratorError::ConfigError(_))
        ));
    }
}
