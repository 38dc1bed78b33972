//! Generation settings.
//!
//! [`GeneratorConfig`] carries everything about a generation run that does
//! not come from the document itself. Defaults match the runtime's retry
//! constants, so a client generated with `GeneratorConfig::default()`
//! behaves exactly like [`clientgen::RetryPolicy::default`].

use std::time::Duration;

use clientgen::{DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_ATTEMPTS};

use crate::errors::GeneratorError;
use crate::naming::is_plain_ident;
use crate::validation::RESERVED_TYPE_NAMES;

/// Default name of the generated client struct.
pub const DEFAULT_CLIENT_NAME: &str = "ApiClient";

/// Default package name for a generated client crate.
pub const DEFAULT_CRATE_NAME: &str = "api-client";

/// Settings for one generation run.
///
/// ## Examples
///
/// ```
/// use std::time::Duration;
/// use clientgen_gen::config::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_client_name("PetStore")
///     .with_max_attempts(5)
///     .with_backoff_unit(Duration::from_millis(250));
///
/// assert_eq!(config.client_name, "PetStore");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the generated client struct.
    pub client_name: String,
    /// Base URL baked into the client; falls back to the document's first
    /// server, then to the empty string.
    pub base_url: Option<String>,
    /// Retry budget emitted into the client's default policy.
    pub max_attempts: u32,
    /// Backoff unit emitted into the client's default policy.
    pub backoff_unit: Duration,
    /// Package name used when generating a `Cargo.toml`.
    pub crate_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            base_url: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            crate_name: DEFAULT_CRATE_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the client struct name.
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the linear backoff unit.
    #[must_use]
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Sets the generated crate's package name.
    #[must_use]
    pub fn with_crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Checks the settings.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` if the client name is not a
    /// plain Rust identifier starting with an uppercase letter, the client
    /// name is one the generated file already defines or uses, the retry
    /// budget is zero, or the crate name is not a valid package name.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if !is_plain_ident(&self.client_name) {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{}' is not a valid Rust identifier",
                self.client_name
            )));
        }

        if !self.client_name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{}' must start with an uppercase letter",
                self.client_name
            )));
        }

        if RESERVED_TYPE_NAMES.contains(&self.client_name.as_str()) {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{}' is reserved for the generated client",
                self.client_name
            )));
        }

        if self.max_attempts == 0 {
            return Err(GeneratorError::ConfigError(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let crate_name_ok = !self.crate_name.is_empty()
            && self
                .crate_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !crate_name_ok {
            return Err(GeneratorError::ConfigError(format!(
                "crate name '{}' must be non-empty and contain only letters, digits, '-' or '_'",
                self.crate_name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_runtime_constants() {
        let config = GeneratorConfig::default();
        assert_eq!(config.client_name, "ApiClient");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff_unit, Duration::from_millis(100));
        assert!(config.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_client_name() {
        let err = GeneratorConfig::default()
            .with_client_name("my client")
            .validate()
            .unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
        assert!(err.to_string().contains("my client"));
    }

    #[test]
    fn rejects_reserved_client_names() {
        for name in [
            "ClientError",
            "PaginatedResponse",
            "RequestContext",
            "RetryPolicy",
            "TransportError",
            "Duration",
            "String",
        ] {
            let err = GeneratorConfig::default()
                .with_client_name(name)
                .validate()
                .unwrap_err();
            assert!(matches!(err, GeneratorError::ConfigError(_)), "{name}");
            assert!(err.to_string().contains("reserved"), "{name}: {err}");
        }
    }

    #[test]
    fn rejects_lowercase_client_names() {
        for name in ["u16", "str", "client"] {
            let result = GeneratorConfig::default().with_client_name(name).validate();
            assert!(matches!(result, Err(GeneratorError::ConfigError(_))), "{name}");
        }
    }

    #[test]
    fn rejects_zero_attempts() {
        let result = GeneratorConfig::default().with_max_attempts(0).validate();
        assert!(matches!(result, Err(GeneratorError::ConfigError(_))));
    }

    #[test]
    fn rejects_invalid_crate_name() {
        let result = GeneratorConfig::default().with_crate_name("bad name").validate();
        assert!(matches!(result, Err(GeneratorError::ConfigError(_))));
    }
}
