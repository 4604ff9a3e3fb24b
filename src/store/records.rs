//! Release, package and compiled package records
//!
//! These are the rows the upload pipeline writes. The matching engine only
//! reads them.

use crate::error::RelmatchError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Internal package identity; ascending ids follow record creation order
pub type PackageId = u64;

/// OS image a compiled package was built against, e.g. `ubuntu-trusty/3000`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetImage {
    pub os: String,
    pub version: String,
}

impl TargetImage {
    pub fn new(os: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for TargetImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.version)
    }
}

impl FromStr for TargetImage {
    type Err = RelmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((os, version)) if !os.is_empty() && !version.is_empty() => {
                Ok(Self::new(os, version))
            }
            _ => Err(RelmatchError::InvalidTargetImage(s.to_string())),
        }
    }
}

impl TryFrom<String> for TargetImage {
    type Error = RelmatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetImage> for String {
    fn from(image: TargetImage) -> Self {
        image.to_string()
    }
}

/// One version of a release and whether its last upload completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseVersion {
    pub release: String,
    pub version: String,
    #[serde(default)]
    pub finalized: bool,
}

/// Source package record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub id: PackageId,
    pub release: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// Blob identifier; `None` when the package was declared but never uploaded
    #[serde(default)]
    pub artifact_id: Option<String>,
}

impl Package {
    pub fn new(
        release: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            release: release.into(),
            name: name.into(),
            version: version.into(),
            fingerprint: None,
            artifact_id: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn with_artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    /// Whether a source artifact is actually stored for this record
    pub fn has_artifact(&self) -> bool {
        self.artifact_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Compiled package record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPackage {
    #[serde(default)]
    pub id: u64,
    pub package_id: PackageId,
    pub artifact_id: String,
    pub target_image: TargetImage,
    /// Recorded dependency key, compared byte-for-byte
    pub dependency_key: String,
}

impl CompiledPackage {
    pub fn new(
        artifact_id: impl Into<String>,
        target_image: TargetImage,
        dependency_key: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            package_id: 0,
            artifact_id: artifact_id.into(),
            target_image,
            dependency_key: dependency_key.into(),
        }
    }

    /// Whether a compiled artifact is actually stored for this record
    pub fn has_artifact(&self) -> bool {
        !self.artifact_id.is_empty()
    }
}

/// Full record set as written by the upload pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub release_versions: Vec<ReleaseVersion>,
    pub packages: Vec<Package>,
    pub compiled_packages: Vec<CompiledPackage>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a release version
    pub fn add_release_version(&mut self, release: &str, version: &str, finalized: bool) {
        match self.release_version_mut(release, version) {
            Some(existing) => existing.finalized = finalized,
            None => self.release_versions.push(ReleaseVersion {
                release: release.to_string(),
                version: version.to_string(),
                finalized,
            }),
        }
    }

    /// Flip the finalized flag; returns false if the version is unknown
    pub fn set_finalized(&mut self, release: &str, version: &str, finalized: bool) -> bool {
        match self.release_version_mut(release, version) {
            Some(existing) => {
                existing.finalized = finalized;
                true
            }
            None => false,
        }
    }

    /// Insert a package, assigning the next id
    pub fn add_package(&mut self, mut package: Package) -> PackageId {
        package.id = self.packages.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let id = package.id;
        self.packages.push(package);
        id
    }

    /// Insert a compiled package for `package_id`, assigning the next id
    pub fn add_compiled_package(&mut self, package_id: PackageId, mut compiled: CompiledPackage) -> u64 {
        compiled.id = self
            .compiled_packages
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1;
        compiled.package_id = package_id;
        let id = compiled.id;
        self.compiled_packages.push(compiled);
        id
    }

    pub fn release_version(&self, release: &str, version: &str) -> Option<&ReleaseVersion> {
        self.release_versions
            .iter()
            .find(|rv| rv.release == release && rv.version == version)
    }

    fn release_version_mut(&mut self, release: &str, version: &str) -> Option<&mut ReleaseVersion> {
        self.release_versions
            .iter_mut()
            .find(|rv| rv.release == release && rv.version == version)
    }

    /// Packages of `release` carrying one of `fingerprints` and a stored
    /// artifact, in creation order
    pub fn stored_packages_with_fingerprints(
        &self,
        release: &str,
        fingerprints: &[String],
    ) -> Vec<Package> {
        let wanted: HashSet<&str> = fingerprints.iter().map(String::as_str).collect();
        let mut found: Vec<Package> = self
            .packages
            .iter()
            .filter(|p| p.release == release && p.has_artifact())
            .filter(|p| p.fingerprint.as_deref().is_some_and(|f| wanted.contains(f)))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.id);
        found
    }

    /// First package (by creation order) with this exact name, version and fingerprint
    pub fn find_package(
        &self,
        release: &str,
        name: &str,
        version: &str,
        fingerprint: &str,
    ) -> Option<&Package> {
        self.packages
            .iter()
            .filter(|p| {
                p.release == release
                    && p.name == name
                    && p.version == version
                    && p.fingerprint.as_deref() == Some(fingerprint)
            })
            .min_by_key(|p| p.id)
    }

    pub fn compiled_packages_for(&self, package_id: PackageId) -> Vec<CompiledPackage> {
        self.compiled_packages
            .iter()
            .filter(|c| c.package_id == package_id)
            .cloned()
            .collect()
    }

    /// Check referential integrity of a loaded document
    pub fn validate(&self) -> Result<(), String> {
        let mut ids = HashSet::new();
        for package in &self.packages {
            if !ids.insert(package.id) {
                return Err(format!("duplicate package id {}", package.id));
            }
        }
        for compiled in &self.compiled_packages {
            if compiled.artifact_id.is_empty() {
                return Err(format!("compiled package {} has no artifact id", compiled.id));
            }
            if !ids.contains(&compiled.package_id) {
                return Err(format!(
                    "compiled package {} references unknown package {}",
                    compiled.id, compiled.package_id
                ));
            }
        }
        Ok(())
    }
}
