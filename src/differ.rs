//! Manifest differ
//!
//! Compares declared manifest versions against the resolved-version map and
//! produces the update plan. Decisions per entry:
//! - outside the family namespace: not ours, ignored
//! - no resolution in the map: skipped silently (no stable release upstream)
//! - resolution equals the declared version: already current, not planned
//! - otherwise: planned for update
//!
//! Plan order follows the manifest file's entry order; no re-sorting.

use crate::domain::{ManifestEntry, PlannedUpdate, UpdatePlan};
use crate::resolve::VersionMap;
use std::collections::HashSet;

/// Builds the update plan for one reconciliation run
pub fn build_plan(entries: &[ManifestEntry], versions: &VersionMap) -> UpdatePlan {
    let mut plan = UpdatePlan::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in entries {
        let Some(category) = entry.category() else {
            continue;
        };
        // An entry contributes at most one edit per run
        if !seen.insert(entry.name.as_str()) {
            continue;
        }
        let Some(resolved) = versions.resolve(entry) else {
            continue;
        };
        if entry.declared == resolved.to_string() {
            continue;
        }

        plan.push(PlannedUpdate {
            entry: entry.clone(),
            new_version: resolved.clone(),
            category,
        });
    }

    plan
}

/// Family entries the feed path left unresolved, in manifest order
///
/// These are the candidates for package-manager delegation.
pub fn unresolved_entries<'a>(
    entries: &'a [ManifestEntry],
    versions: &VersionMap,
) -> Vec<&'a ManifestEntry> {
    entries
        .iter()
        .filter(|entry| entry.category().is_some() && versions.resolve(entry).is_none())
        .collect()
}
