//! Error types for relmatch
//!
//! All modules use `RelmatchResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relmatch operations
pub type RelmatchResult<T> = Result<T, RelmatchError>;

/// Error code reported to upload clients for unusable match manifests
pub const BAD_MANIFEST_CODE: u32 = 440001;

/// All errors that can occur in relmatch
#[derive(Error, Debug)]
pub enum RelmatchError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Record store errors
    #[error("Record store '{backend}' unavailable: {reason}")]
    StoreUnavailable { backend: String, reason: String },

    #[error("Record store document {path} is corrupt: {reason}")]
    StoreCorrupt { path: PathBuf, reason: String },

    // Manifest errors
    #[error("Manifest doesn't have a usable packages section")]
    BadManifest,

    #[error("Invalid manifest: {0}")]
    ManifestInvalid(String),

    #[error("Invalid target image '{0}', expected <os>/<version>")]
    InvalidTargetImage(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl RelmatchError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a store unavailable error
    pub fn store_unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Numeric code reported across the request boundary, if any
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::BadManifest | Self::ManifestInvalid(_) | Self::InvalidTargetImage(_) => {
                Some(BAD_MANIFEST_CODE)
            }
            _ => None,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BadManifest => {
                Some("The manifest must be a mapping with a list under 'packages' or 'compiled_packages'")
            }
            Self::InvalidTargetImage(_) => Some("Use the form ubuntu-trusty/3000"),
            Self::StoreUnavailable { .. } => {
                Some("Check [store] in the config, or pass --store <records file>")
            }
            Self::ConfigInvalid { .. } => Some("Run: relmatch config init --force"),
            _ => None,
        }
    }
}
