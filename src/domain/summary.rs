//! Reconciliation run summary types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One version substitution that was applied to the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedUpdate {
    /// Package name
    pub package: String,
    /// Version that was declared before the run
    pub old_version: String,
    /// Version that was written
    pub new_version: String,
}

impl fmt::Display for AppliedUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.package, self.old_version, self.new_version
        )
    }
}

/// Outcome of one package-manager-delegated update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatedUpdate {
    /// Package name
    pub package: String,
    /// Version the external tool reported as latest
    pub version: String,
    /// Whether the pin command succeeded
    pub succeeded: bool,
}

/// Outcome of the build-descriptor constant rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorOutcome {
    /// Descriptor file path
    pub path: PathBuf,
    /// Whether the constant value changed
    pub updated: bool,
    /// Version the constant now holds
    pub version: String,
}

/// Summary of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Manifest file the run targeted
    pub manifest_path: PathBuf,
    /// Core version the run reconciled against
    pub core_version: Option<String>,
    /// Substitutions applied through the manifest document
    pub updates: Vec<AppliedUpdate>,
    /// Family packages already at their resolved version
    pub up_to_date: Vec<String>,
    /// Packages updated through the external package manager
    pub delegated: Vec<DelegatedUpdate>,
    /// Build-descriptor outcome, when a descriptor path was configured
    pub descriptor: Option<DescriptorOutcome>,
    /// Non-fatal problems encountered along the way
    pub errors: Vec<String>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ReconcileSummary {
    /// Creates an empty summary for a manifest path
    pub fn new(manifest_path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            dry_run,
            ..Self::default()
        }
    }

    /// Total updates across the manifest, delegation, and descriptor paths
    pub fn total_updates(&self) -> usize {
        let delegated = self.delegated.iter().filter(|d| d.succeeded).count();
        let descriptor = usize::from(self.descriptor.as_ref().is_some_and(|d| d.updated));
        self.updates.len() + delegated + descriptor
    }

    /// Returns true if the run changed anything (or would have, in dry-run)
    pub fn has_changes(&self) -> bool {
        self.total_updates() > 0
    }

    /// Returns true if any non-fatal errors were recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
