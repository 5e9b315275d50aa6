//! Breaking-change scanner
//!
//! Independent analysis over a release feed: given an old and new core
//! version, flag every stable release in the range `(old, new]` whose notes
//! carry the breaking-change marker.
//!
//! The marker is the literal markdown bullet `* **Breaking Change**`,
//! matched case-sensitively. A release that merely mentions breaking changes
//! in prose is not flagged.

use crate::domain::{BreakingChangeReport, BreakingRelease, CanonicalVersion, ReleaseRecord};
use crate::error::FeedError;
use crate::feed::ReleaseFeed;
use regex::Regex;
use std::sync::OnceLock;

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\s*\*\*Breaking\s+Change\*\*").expect("valid pattern"))
}

/// Returns true if release notes carry the breaking-change marker
pub fn has_breaking_marker(body: &str) -> bool {
    marker_regex().is_match(body)
}

/// Extracts the canonical version from a release tag
///
/// Plain tags (`core-1.9.0`, `v1.9.0`, `1.9.0`) are tried first, composite
/// tags (`Instrumentation.AspNetCore-1.12.0`) as a fallback. Tags matching
/// neither shape yield None and are skipped by the scan.
fn tag_version(tag: &str) -> Option<CanonicalVersion> {
    CanonicalVersion::from_tag(tag)
        .or_else(|| CanonicalVersion::from_composite_tag(tag).map(|(_, version)| version))
}

/// Filters records down to marked releases in `(old, new]`, feed order
pub fn filter_breaking(
    records: &[ReleaseRecord],
    old: &CanonicalVersion,
    new: &CanonicalVersion,
) -> Vec<BreakingRelease> {
    let mut releases = Vec::new();

    for record in records {
        if record.prerelease {
            continue;
        }
        let Some(version) = tag_version(&record.tag) else {
            continue;
        };
        if !(version > *old && version <= *new) {
            continue;
        }
        if !has_breaking_marker(&record.body) {
            continue;
        }

        releases.push(BreakingRelease {
            version,
            title: record.title.clone(),
            url: record.url.clone(),
            tag: record.tag.clone(),
        });
    }

    releases
}

/// Scans a feed for breaking changes between two core versions
pub async fn scan(
    feed: &dyn ReleaseFeed,
    repo: &str,
    old: &CanonicalVersion,
    new: &CanonicalVersion,
) -> Result<BreakingChangeReport, FeedError> {
    let records = feed.list_releases(repo).await?;

    let mut report = BreakingChangeReport::new(repo, old.clone(), new.clone());
    report.releases = filter_breaking(&records, old, new);
    Ok(report)
}
