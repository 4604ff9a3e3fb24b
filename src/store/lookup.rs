//! Record lookup abstraction
//!
//! The matching engine never writes records. It asks a `RecordStore` for a
//! snapshot and runs every lookup of one match call against it, so a
//! concurrent finalize or upload is never seen half-applied.

use crate::error::RelmatchResult;
use crate::store::records::{CompiledPackage, Package, PackageId, ReleaseVersion, Records};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of read-consistent record snapshots
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Open one read-consistent view of the records
    async fn snapshot(&self) -> RelmatchResult<Box<dyn RecordSnapshot>>;

    /// Get the human-readable backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Read-only lookups over one consistent view of the records
#[async_trait]
pub trait RecordSnapshot: Send + Sync {
    /// Look up a release version by release name and version
    async fn release_version(
        &self,
        release: &str,
        version: &str,
    ) -> RelmatchResult<Option<ReleaseVersion>>;

    /// Packages of `release` with one of `fingerprints` and a stored
    /// artifact, ascending by creation order
    async fn stored_packages_with_fingerprints(
        &self,
        release: &str,
        fingerprints: &[String],
    ) -> RelmatchResult<Vec<Package>>;

    /// Resolve a package by name, version and fingerprint
    async fn find_package(
        &self,
        release: &str,
        name: &str,
        version: &str,
        fingerprint: &str,
    ) -> RelmatchResult<Option<Package>>;

    /// Compiled packages built from `package_id`
    async fn compiled_packages(&self, package_id: PackageId)
        -> RelmatchResult<Vec<CompiledPackage>>;
}

/// Snapshot over an immutable, shared record set
pub struct RecordsSnapshot {
    records: Arc<Records>,
}

impl RecordsSnapshot {
    pub fn new(records: Arc<Records>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSnapshot for RecordsSnapshot {
    async fn release_version(
        &self,
        release: &str,
        version: &str,
    ) -> RelmatchResult<Option<ReleaseVersion>> {
        Ok(self.records.release_version(release, version).cloned())
    }

    async fn stored_packages_with_fingerprints(
        &self,
        release: &str,
        fingerprints: &[String],
    ) -> RelmatchResult<Vec<Package>> {
        Ok(self
            .records
            .stored_packages_with_fingerprints(release, fingerprints))
    }

    async fn find_package(
        &self,
        release: &str,
        name: &str,
        version: &str,
        fingerprint: &str,
    ) -> RelmatchResult<Option<Package>> {
        Ok(self
            .records
            .find_package(release, name, version, fingerprint)
            .cloned())
    }

    async fn compiled_packages(
        &self,
        package_id: PackageId,
    ) -> RelmatchResult<Vec<CompiledPackage>> {
        Ok(self.records.compiled_packages_for(package_id))
    }
}
