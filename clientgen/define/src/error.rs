//! Errors raised while loading a document.

use thiserror::Error;

/// Errors that can occur while reading an API document.
#[derive(Debug, Error)]
pub enum DefineError {
    /// The document file could not be read.
    #[error("Failed to read API document '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the document model.
    #[error("Failed to parse API document as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML for the document model.
    #[error("Failed to parse API document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
