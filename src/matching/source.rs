//! Source package matching

use crate::error::RelmatchResult;
use crate::manifest::SourceEntry;
use crate::matching::gate::is_finalized;
use crate::store::RecordSnapshot;
use std::collections::HashSet;
use tracing::debug;

/// Fingerprints from `entries` already backed by a stored source artifact
///
/// Entries without a fingerprint are ignored. A package record whose
/// artifact was never stored does not count. Results follow the creation
/// order of the matching records, each fingerprint once.
pub async fn match_packages(
    snapshot: &dyn RecordSnapshot,
    release: &str,
    version: &str,
    entries: &[SourceEntry],
) -> RelmatchResult<Vec<String>> {
    if !is_finalized(snapshot, release, version).await? {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let fingerprints: Vec<String> = entries
        .iter()
        .filter_map(|e| e.fingerprint.as_deref())
        .filter(|f| seen.insert(*f))
        .map(str::to_string)
        .collect();
    if fingerprints.is_empty() {
        return Ok(Vec::new());
    }

    let packages = snapshot
        .stored_packages_with_fingerprints(release, &fingerprints)
        .await?;

    let mut reported = HashSet::new();
    let matched: Vec<String> = packages
        .into_iter()
        .filter_map(|p| p.fingerprint)
        .filter(|f| reported.insert(f.clone()))
        .collect();

    debug!(
        "{} of {} fingerprints have stored source artifacts",
        matched.len(),
        fingerprints.len()
    );
    Ok(matched)
}
