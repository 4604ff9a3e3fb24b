//! Package matching engine
//!
//! Tells an uploading client which packages of a release it can skip:
//! - source packages whose fingerprint already has a stored artifact
//! - compiled packages already built for the same target image and the
//!   same dependency closure
//!
//! Every match call reads one record snapshot, so the finalize check and the
//! package lookups see the same state. Nothing here writes records.

pub mod closure;
pub mod compiled;
pub mod gate;
pub mod source;

pub use closure::{dependency_key, RequestIndex};
pub use compiled::match_compiled_packages;
pub use gate::is_finalized;
pub use source::match_packages;

use crate::error::RelmatchResult;
use crate::manifest::{CompiledMatchRequest, SourceMatchRequest};
use crate::store::RecordStore;
use tracing::info;

/// Runs match requests against a record store
pub struct Matcher<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> Matcher<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Fingerprints of source packages the client need not upload
    pub async fn match_source(&self, request: &SourceMatchRequest) -> RelmatchResult<Vec<String>> {
        let snapshot = self.store.snapshot().await?;
        let matched = match_packages(
            snapshot.as_ref(),
            &request.name,
            &request.version,
            &request.packages,
        )
        .await?;

        info!(
            "Source match {}/{} via {}: {} of {} entries",
            request.name,
            request.version,
            self.store.backend_name(),
            matched.len(),
            request.packages.len()
        );
        Ok(matched)
    }

    /// Fingerprints of compiled packages the client need not upload
    pub async fn match_compiled(
        &self,
        request: &CompiledMatchRequest,
    ) -> RelmatchResult<Vec<String>> {
        let snapshot = self.store.snapshot().await?;
        let matched = match_compiled_packages(
            snapshot.as_ref(),
            &request.name,
            &request.version,
            &request.compiled_packages,
        )
        .await?;

        info!(
            "Compiled match {}/{} via {}: {} of {} entries",
            request.name,
            request.version,
            self.store.backend_name(),
            matched.len(),
            request.compiled_packages.len()
        );
        Ok(matched)
    }
}

/// Dependency key of the entry named `package` within `request`
pub fn dependency_key_for(request: &CompiledMatchRequest, package: &str) -> Option<String> {
    let index = RequestIndex::new(&request.compiled_packages);
    index.get(package).map(|entry| dependency_key(entry, &index))
}
