//! Error types for the client generator.

use clientgen_define::DefineError;
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to load the API document
    #[error("Failed to load API document: {0}")]
    Load(#[from] DefineError),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Two operations sanitize to the same generated method name.
    ///
    /// For example `GET /user-list` and `GET /user_list` both become
    /// `get_user_list`.
    #[error(
        "Naming collision: {first} and {second} both generate method '{function}'. Suggestion: rename one of the paths"
    )]
    NamingCollision {
        /// The generated method name.
        function: String,
        /// The first operation (`METHOD /path`).
        first: String,
        /// The colliding operation (`METHOD /path`).
        second: String,
    },

    /// Two schemas map to the same Rust type name.
    #[error("Schemas '{first}' and '{second}' both generate type '{type_name}'")]
    DuplicateTypeName {
        /// The generated type name.
        type_name: String,
        /// The first schema name.
        first: String,
        /// The colliding schema name.
        second: String,
    },

    /// Two properties of one schema map to the same Rust field name.
    #[error(
        "Schema '{schema}': properties '{first}' and '{second}' both generate field '{field}'"
    )]
    DuplicateFieldName {
        /// The schema name from the document.
        schema: String,
        /// The generated field name.
        field: String,
        /// The first property name.
        first: String,
        /// The colliding property name.
        second: String,
    },

    /// A schema's type name clashes with a type the generator emits itself.
    #[error(
        "Schema '{schema}' generates type '{type_name}', which is reserved for the generated client"
    )]
    ReservedTypeName {
        /// The schema name from the document.
        schema: String,
        /// The reserved type name it maps to.
        type_name: String,
    },
}
