//! Upstream release records and the breaking-change report

use super::CanonicalVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel emitted when a scan finds nothing to report
pub const NO_BREAKING_CHANGES: &str = "No breaking changes detected in releases.";

/// One release as published by an upstream feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Raw tag name, e.g. `core-1.9.0` or `Instrumentation.AspNetCore-1.12.0`
    pub tag: String,
    /// Release title
    pub title: String,
    /// Web URL of the release page
    pub url: String,
    /// Whether the feed flags this release as a pre-release
    pub prerelease: bool,
    /// Release-notes body text
    pub body: String,
    /// Publication timestamp, when the feed provides one
    pub published_at: Option<DateTime<Utc>>,
}

impl ReleaseRecord {
    /// Creates a stable record with an empty body and no timestamp
    pub fn new(tag: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            title: title.into(),
            url: url.into(),
            prerelease: false,
            body: String::new(),
            published_at: None,
        }
    }

    /// Sets the prerelease flag (builder pattern)
    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Sets the release-notes body (builder pattern)
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A release flagged as carrying a breaking change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingRelease {
    /// Canonical version extracted from the tag
    pub version: CanonicalVersion,
    /// Release title
    pub title: String,
    /// Web URL of the release page
    pub url: String,
    /// Raw tag name
    pub tag: String,
}

impl fmt::Display for BreakingRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.url)
    }
}

/// Result of scanning the release range `(old, new]` for breaking changes
///
/// Releases appear in feed iteration order, not re-sorted by version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChangeReport {
    /// Feed the scan ran against
    pub repo: String,
    /// Lower bound of the scanned range (exclusive)
    pub old_version: CanonicalVersion,
    /// Upper bound of the scanned range (inclusive)
    pub new_version: CanonicalVersion,
    /// Releases whose notes carry the breaking-change marker
    pub releases: Vec<BreakingRelease>,
}

impl BreakingChangeReport {
    /// Creates an empty report for a range
    pub fn new(
        repo: impl Into<String>,
        old_version: CanonicalVersion,
        new_version: CanonicalVersion,
    ) -> Self {
        Self {
            repo: repo.into(),
            old_version,
            new_version,
            releases: Vec::new(),
        }
    }

    /// Returns true if no breaking releases were found
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Renders the CI summary block
    ///
    /// A markdown link list headed by the feed name, or the sentinel line
    /// when the report is empty.
    pub fn summary_markdown(&self) -> String {
        if self.releases.is_empty() {
            return NO_BREAKING_CHANGES.to_string();
        }

        let mut out = format!("**{}:**\n", self.repo);
        for release in &self.releases {
            out.push_str(&format!("- [{}]({})\n", release.title, release.url));
        }
        out
    }
}
