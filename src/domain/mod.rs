//! Core domain models for otelup
//!
//! This module contains the fundamental types used throughout the application:
//! - Canonical version triples and release-tag parsing
//! - Package categorization (core vs contrib) and manifest entries
//! - Upstream release records and breaking-change reports
//! - Update plans and run summaries

mod package;
mod plan;
mod release;
mod summary;
mod version;

pub use package::{
    categorize, release_prefix, ManifestEntry, PackageCategory, CORE_PACKAGES, NAMESPACE_PREFIX,
};
pub use plan::{PlannedUpdate, UpdatePlan};
pub use release::{BreakingChangeReport, BreakingRelease, ReleaseRecord, NO_BREAKING_CHANGES};
pub use summary::{AppliedUpdate, DelegatedUpdate, DescriptorOutcome, ReconcileSummary};
pub use version::{has_prerelease_marker, CanonicalVersion};
