//! Package categorization and manifest entries

use super::CanonicalVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix identifying packages that belong to the dependency family
pub const NAMESPACE_PREFIX: &str = "OpenTelemetry";

/// Packages that always track the shared upstream core release line
pub const CORE_PACKAGES: [&str; 4] = [
    "OpenTelemetry",
    "OpenTelemetry.Api",
    "OpenTelemetry.Exporter.OpenTelemetryProtocol",
    "OpenTelemetry.Extensions.Propagators",
];

/// How a family package resolves its upstream version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageCategory {
    /// Tracks the shared core release line
    Core,
    /// Resolves individually against its own release line
    Contrib,
}

impl fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageCategory::Core => write!(f, "core"),
            PackageCategory::Contrib => write!(f, "contrib"),
        }
    }
}

/// Categorizes a package name, or returns None for packages outside the family
pub fn categorize(name: &str) -> Option<PackageCategory> {
    if !name.starts_with(NAMESPACE_PREFIX) {
        return None;
    }
    if CORE_PACKAGES.contains(&name) {
        Some(PackageCategory::Core)
    } else {
        Some(PackageCategory::Contrib)
    }
}

/// Derives the release-tag prefix for a contrib package
///
/// Contrib releases are tagged `<component>-<version>` where the component is
/// the package name with the family namespace stripped:
/// `OpenTelemetry.Instrumentation.AspNetCore` → `Instrumentation.AspNetCore`.
pub fn release_prefix(name: &str) -> Option<&str> {
    if categorize(name) != Some(PackageCategory::Contrib) {
        return None;
    }
    name.strip_prefix(NAMESPACE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
}

/// A package reference declared in the distribution manifest
///
/// Entries pre-exist in the manifest file; this tool never creates or removes
/// them, only rewrites their version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Package name as declared
    pub name: String,
    /// Declared version, kept as the raw manifest string
    pub declared: String,
}

impl ManifestEntry {
    /// Creates a new manifest entry
    pub fn new(name: impl Into<String>, declared: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: declared.into(),
        }
    }

    /// The declared version as a canonical triple, when it parses as one
    pub fn declared_canonical(&self) -> Option<CanonicalVersion> {
        CanonicalVersion::parse(&self.declared)
    }

    /// Category of this entry, or None for packages outside the family
    pub fn category(&self) -> Option<PackageCategory> {
        categorize(&self.name)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.declared)
    }
}
