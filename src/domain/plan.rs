//! Update plan computed by the manifest differ

use super::{CanonicalVersion, ManifestEntry, PackageCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single planned manifest edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedUpdate {
    /// The manifest entry being updated
    pub entry: ManifestEntry,
    /// Resolved upstream version to write
    pub new_version: CanonicalVersion,
    /// Category the resolution came from
    pub category: PackageCategory,
}

impl fmt::Display for PlannedUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.entry.name, self.entry.declared, self.new_version
        )
    }
}

/// Ordered set of manifest edits for one reconciliation run
///
/// Transient: computed fresh per run, never persisted. Order follows the
/// manifest file's entry order, and a package appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlan {
    /// Planned edits in manifest order
    pub updates: Vec<PlannedUpdate>,
}

impl UpdatePlan {
    /// Creates an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a planned update
    pub fn push(&mut self, update: PlannedUpdate) {
        self.updates.push(update);
    }

    /// Returns true when nothing needs updating
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Number of planned edits
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns true if the plan already targets a package
    pub fn contains(&self, name: &str) -> bool {
        self.updates.iter().any(|u| u.entry.name == name)
    }

    /// Iterates the planned edits in order
    pub fn iter(&self) -> impl Iterator<Item = &PlannedUpdate> {
        self.updates.iter()
    }

    /// Names of the packages the plan touches, in order
    pub fn package_names(&self) -> Vec<&str> {
        self.updates.iter().map(|u| u.entry.name.as_str()).collect()
    }
}
