//! Filesystem configuration
//!
//! Settings are typed, serializable and validated before a filesystem is
//! built from them. The URI scheme of root identifiers lives here instead
//! of in a process-wide constant.

use core_types::NamespaceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheme used when none is configured
pub const DEFAULT_URI_SCHEME: &str = "archive";

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Input is not valid configuration JSON
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Scheme is empty or contains characters a URI scheme cannot hold
    #[error("Invalid URI scheme: {0:?}")]
    InvalidScheme(String),
}

/// Settings for one archive filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSystemConfig {
    /// Scheme of root identifiers (`<scheme>://<namespace id>/`)
    pub uri_scheme: String,
    /// Human-readable archive name, only used in log output
    pub archive_name: Option<String>,
    /// Create missing parent directories when creating or writing files
    pub create_missing_parents: bool,
}

impl FileSystemConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self {
            uri_scheme: DEFAULT_URI_SCHEME.to_string(),
            archive_name: None,
            create_missing_parents: false,
        }
    }

    /// Sets the URI scheme
    pub fn with_uri_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.uri_scheme = scheme.into();
        self
    }

    /// Sets the archive name
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = Some(name.into());
        self
    }

    /// Enables or disables parent creation for file writes
    pub fn with_create_missing_parents(mut self, enabled: bool) -> Self {
        self.create_missing_parents = enabled;
        self
    }

    /// Parses and validates configuration from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Checks that the configuration can be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_scheme(&self.uri_scheme) {
            return Err(ConfigError::InvalidScheme(self.uri_scheme.clone()));
        }
        Ok(())
    }

    /// Builds the root identifier of namespace `id`
    pub fn root_uri(&self, id: NamespaceId) -> String {
        format!("{}://{}/", self.uri_scheme, id.hyphenated())
    }
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
