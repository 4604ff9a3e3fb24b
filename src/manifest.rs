//! Match request documents
//!
//! Upload clients describe the packages they are about to send as a YAML
//! document (JSON is accepted too, being valid YAML). A source request lists
//! fingerprints under `packages`; a compiled request lists full entries under
//! `compiled_packages`. Documents without a usable list section are rejected
//! here, before any matching runs.

use crate::error::{RelmatchError, RelmatchResult};
use crate::store::TargetImage;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Source package entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl SourceEntry {
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: Some(fingerprint.into()),
        }
    }
}

/// Compiled package entry with its direct dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledEntry {
    pub name: String,
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(alias = "stemcell", alias = "targetImage")]
    pub target_image: TargetImage,
    /// Direct dependency names in declaration order
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl CompiledEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        fingerprint: impl Into<String>,
        target_image: TargetImage,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            fingerprint: Some(fingerprint.into()),
            target_image,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// Request to match source packages of one release version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMatchRequest {
    /// Release name; empty when the client leaves it out
    #[serde(default)]
    pub name: String,
    /// Release version
    #[serde(default, deserialize_with = "version_string")]
    pub version: String,
    pub packages: Vec<SourceEntry>,
}

impl SourceMatchRequest {
    /// Parse a request document
    pub fn parse(content: &str) -> RelmatchResult<Self> {
        let document = checked_document(content, "packages")?;
        serde_yaml::from_value(document).map_err(|e| RelmatchError::ManifestInvalid(e.to_string()))
    }

    /// Parse a request document from disk
    pub async fn from_file(path: &Path) -> RelmatchResult<Self> {
        Self::parse(&read_manifest(path).await?)
    }
}

/// Request to match compiled packages of one release version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledMatchRequest {
    /// Release name; empty when the client leaves it out
    #[serde(default)]
    pub name: String,
    /// Release version
    #[serde(default, deserialize_with = "version_string")]
    pub version: String,
    pub compiled_packages: Vec<CompiledEntry>,
}

impl CompiledMatchRequest {
    /// Parse a request document
    pub fn parse(content: &str) -> RelmatchResult<Self> {
        let document = checked_document(content, "compiled_packages")?;
        serde_yaml::from_value(document).map_err(|e| RelmatchError::ManifestInvalid(e.to_string()))
    }

    /// Parse a request document from disk
    pub async fn from_file(path: &Path) -> RelmatchResult<Self> {
        Self::parse(&read_manifest(path).await?)
    }

    /// Find an entry by package name
    pub fn entry(&self, name: &str) -> Option<&CompiledEntry> {
        self.compiled_packages.iter().find(|e| e.name == name)
    }
}

async fn read_manifest(path: &Path) -> RelmatchResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RelmatchError::io(format!("reading manifest {}", path.display()), e))
}

/// Parse YAML and require a mapping with a list under `section`
fn checked_document(content: &str, section: &str) -> RelmatchResult<serde_yaml::Value> {
    let document: serde_yaml::Value = serde_yaml::from_str(content)?;
    let usable = document
        .as_mapping()
        .and_then(|m| m.get(section))
        .is_some_and(serde_yaml::Value::is_sequence);
    if !usable {
        return Err(RelmatchError::BadManifest);
    }
    Ok(document)
}

/// Accept versions written as strings or bare numbers (`version: 1`)
///
/// Numbers keep their YAML spelling, so `1.0` stays `"1.0"`. A null
/// version reads as empty and resolves to no release version.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a version string or number, found {:?}",
            other
        ))),
    }
}
