//! Change applier
//!
//! Executes an update plan against the manifest document: each planned entry
//! gets its version value swapped in place, and the file is written back
//! wholesale once, only when something actually changed and the run is not a
//! dry run. Re-running with target versions equal to the declared ones writes
//! nothing.

use crate::domain::{AppliedUpdate, UpdatePlan};
use crate::manifest::ManifestDocument;

/// Applies update plans to manifest documents
pub struct ChangeApplier {
    /// Whether to skip the final file write
    dry_run: bool,
}

/// Result of applying a plan to one manifest
#[derive(Debug, Default)]
pub struct ApplyResult {
    /// Substitutions that changed the document
    pub applied: Vec<AppliedUpdate>,
    /// Planned packages whose entry was absent or unchanged in the document
    pub skipped: Vec<String>,
    /// Whether the manifest file was written
    pub file_modified: bool,
    /// Problems encountered while writing
    pub errors: Vec<String>,
}

impl ApplyResult {
    /// Returns true if any substitution was applied
    pub fn has_updates(&self) -> bool {
        !self.applied.is_empty()
    }
}

impl ChangeApplier {
    /// Creates a new applier
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Check if this applier is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Applies every planned update to the document, then saves once
    pub fn apply(&self, doc: &mut ManifestDocument, plan: &UpdatePlan) -> ApplyResult {
        let mut result = ApplyResult::default();

        for update in plan.iter() {
            let new_version = update.new_version.to_string();
            if doc.set_version(&update.entry.name, &new_version) {
                result.applied.push(AppliedUpdate {
                    package: update.entry.name.clone(),
                    old_version: update.entry.declared.clone(),
                    new_version,
                });
            } else {
                result.skipped.push(update.entry.name.clone());
            }
        }

        if result.has_updates() && !self.dry_run {
            match doc.save() {
                Ok(()) => result.file_modified = true,
                Err(e) => result.errors.push(e.to_string()),
            }
        }

        result
    }
}
