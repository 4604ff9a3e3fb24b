//! Compiled package matching
//!
//! An entry matches when its package resolves by name, version and
//! fingerprint, and a compiled package of it exists for the same target
//! image with exactly the dependency key this request produces.
//!
//! A fingerprint claimed by more than one name within one request is treated
//! as ambiguous: no entry carrying it is reported, even one whose name would
//! resolve on its own. Upload clients rely on this to re-send such packages.

use crate::error::RelmatchResult;
use crate::manifest::CompiledEntry;
use crate::matching::closure::{dependency_key, RequestIndex};
use crate::matching::gate::is_finalized;
use crate::store::RecordSnapshot;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Fingerprints of `entries` already backed by a compiled artifact for the
/// same target image and dependency closure, in manifest order
pub async fn match_compiled_packages(
    snapshot: &dyn RecordSnapshot,
    release: &str,
    version: &str,
    entries: &[CompiledEntry],
) -> RelmatchResult<Vec<String>> {
    if !is_finalized(snapshot, release, version).await? {
        return Ok(Vec::new());
    }

    let index = RequestIndex::new(entries);
    let ambiguous = ambiguous_fingerprints(entries);
    let mut matched: Vec<String> = Vec::new();

    for entry in entries {
        let Some(fingerprint) = entry.fingerprint.as_deref() else {
            continue;
        };
        if ambiguous.contains(fingerprint) {
            debug!(
                "Fingerprint {} of {} is claimed by several names, not matching",
                fingerprint, entry.name
            );
            continue;
        }
        if matched.iter().any(|m| m == fingerprint) {
            continue;
        }

        let Some(package) = snapshot
            .find_package(release, &entry.name, &entry.version, fingerprint)
            .await?
        else {
            continue;
        };

        let desired_key = dependency_key(entry, &index);
        let found = snapshot
            .compiled_packages(package.id)
            .await?
            .iter()
            .any(|c| {
                c.has_artifact()
                    && c.target_image == entry.target_image
                    && c.dependency_key == desired_key
            });

        if found {
            matched.push(fingerprint.to_string());
        } else {
            debug!(
                "No compiled {}/{} for {} with key {}",
                entry.name, entry.version, entry.target_image, desired_key
            );
        }
    }

    Ok(matched)
}

/// Fingerprints that appear under more than one distinct name
fn ambiguous_fingerprints(entries: &[CompiledEntry]) -> HashSet<&str> {
    let mut first_name: HashMap<&str, &str> = HashMap::new();
    let mut ambiguous = HashSet::new();

    for entry in entries {
        let Some(fingerprint) = entry.fingerprint.as_deref() else {
            continue;
        };
        let name = *first_name.entry(fingerprint).or_insert(entry.name.as_str());
        if name != entry.name {
            ambiguous.insert(fingerprint);
        }
    }

    ambiguous
}
