//! Reading documents from JSON or YAML text.
//!
//! The loader deserializes straight into the [`Document`] model, so only the
//! keys the model declares are read and everything else is skipped.

use std::fs;
use std::path::Path;

use crate::error::DefineError;
use crate::types::Document;

impl Document {
    /// Parses a JSON document.
    ///
    /// ## Errors
    ///
    /// Returns [`DefineError::Json`] if the text is not valid JSON or does
    /// not fit the model.
    pub fn from_json_str(content: &str) -> Result<Self, DefineError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parses a YAML document.
    ///
    /// ## Errors
    ///
    /// Returns [`DefineError::Yaml`] if the text is not valid YAML or does
    /// not fit the model.
    pub fn from_yaml_str(content: &str) -> Result<Self, DefineError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a document, picking JSON when the text starts with `{` and
    /// YAML otherwise.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientgen_define::Document;
    ///
    /// let json = Document::from_str_auto(r#"{"paths": {"/items": {"get": {}}}}"#).unwrap();
    /// let yaml = Document::from_str_auto("paths:\n  /items:\n    get: {}\n").unwrap();
    /// assert_eq!(json, yaml);
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns the JSON or YAML parse error for the chosen format.
    pub fn from_str_auto(content: &str) -> Result<Self, DefineError> {
        if content.trim_start().starts_with('{') {
            Self::from_json_str(content)
        } else {
            Self::from_yaml_str(content)
        }
    }

    /// Reads and parses a document file.
    ///
    /// ## Errors
    ///
    /// Returns [`DefineError::Io`] if the file cannot be read, or a parse
    /// error from [`Document::from_str_auto`].
    pub fn load(path: &Path) -> Result<Self, DefineError> {
        let content = fs::read_to_string(path).map_err(|source| DefineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str_auto(&content)
    }
}
