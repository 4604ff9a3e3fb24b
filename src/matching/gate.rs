//! Release version gate
//!
//! A release version whose last upload did not complete reports no matches,
//! so clients re-send everything until it is finalized again.

use crate::error::RelmatchResult;
use crate::store::RecordSnapshot;
use tracing::debug;

/// True only if the release version exists and is finalized
pub async fn is_finalized(
    snapshot: &dyn RecordSnapshot,
    release: &str,
    version: &str,
) -> RelmatchResult<bool> {
    let finalized = match snapshot.release_version(release, version).await? {
        Some(release_version) => release_version.finalized,
        None => {
            debug!("Release version {}/{} not found", release, version);
            false
        }
    };

    if !finalized {
        debug!(
            "Release version {}/{} not finalized, reporting no matches",
            release, version
        );
    }
    Ok(finalized)
}
