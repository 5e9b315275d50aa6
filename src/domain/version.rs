//! Canonical version parsing and ordering
//!
//! This module provides:
//! - CanonicalVersion: the (major, minor, patch) triple all comparisons use
//! - Tag extraction for plain tags (`1.2.3`, `v1.2.3`, `core-1.2.3`)
//! - Tag extraction for composite tags (`Instrumentation.AspNetCore-1.2.3`)
//! - Pre-release marker detection for flat package-index version strings

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Markers that identify a pre-release entry in a flat version index
const PRERELEASE_MARKERS: [&str; 4] = ["alpha", "beta", "rc", "preview"];

fn triple_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid pattern"))
}

fn plain_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:v|core-)?(\d+\.\d+\.\d+)$").expect("valid pattern"))
}

fn composite_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)-(\d+\.\d+\.\d+)$").expect("valid pattern"))
}

/// A normalized `major.minor.patch` version
///
/// Ordering follows semantic-version precedence. A tag that does not carry a
/// bare triple yields no CanonicalVersion; callers skip it rather than error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalVersion(Version);

impl CanonicalVersion {
    /// Creates a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parses a bare `major.minor.patch` token
    ///
    /// Pre-release suffixes and build metadata are rejected, not stripped.
    pub fn parse(s: &str) -> Option<Self> {
        if !triple_regex().is_match(s) {
            return None;
        }
        Version::parse(s).ok().map(Self)
    }

    /// Extracts the version from a plain release tag
    ///
    /// A tag matches if it is a bare triple after stripping an optional
    /// leading `v` or `core-` literal.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let caps = plain_tag_regex().captures(tag)?;
        Version::parse(caps.get(1)?.as_str()).ok().map(Self)
    }

    /// Splits a composite `<component>-<major.minor.patch>` tag
    ///
    /// The split happens on the last hyphen; everything before it is the
    /// component name.
    pub fn from_composite_tag(tag: &str) -> Option<(String, Self)> {
        let caps = composite_tag_regex().captures(tag)?;
        let component = caps.get(1)?.as_str().to_string();
        let version = Version::parse(caps.get(2)?.as_str()).ok().map(Self)?;
        Some((component, version))
    }

    /// Major component
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Minor component
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Patch component
    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns true if a flat-index version string carries a pre-release marker
///
/// The check is case-insensitive and matches anywhere in the string.
pub fn has_prerelease_marker(version: &str) -> bool {
    let lowered = version.to_lowercase();
    PRERELEASE_MARKERS.iter().any(|m| lowered.contains(m))
}
