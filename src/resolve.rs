//! Upstream version resolution
//!
//! This module turns raw feed data into the resolved-version map the differ
//! consumes:
//! - Core resolution: first stable release whose tag parses as a plain triple
//! - Instrumentation resolution: latest stable release tag, kept verbatim
//! - Contrib resolution: component-tagged releases matched against manifest
//!   entries by release prefix
//! - Flat-index selection over a version-string list
//!
//! Selection walks records in feed-provided order (newest-first) and takes
//! the first match; it never re-sorts by version.

use crate::domain::{has_prerelease_marker, CanonicalVersion, ManifestEntry, PackageCategory};
use crate::error::FeedError;
use crate::feed::ReleaseFeed;
use std::collections::HashMap;

/// Reserved key covering every core-category package
pub const CORE_KEY: &str = "core";

/// Resolved upstream versions for one reconciliation run
///
/// The shared core version lives under the reserved `"core"` key; contrib
/// packages are keyed by exact package name.
#[derive(Debug, Clone, Default)]
pub struct VersionMap {
    core: Option<CanonicalVersion>,
    packages: HashMap<String, CanonicalVersion>,
}

impl VersionMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared core version
    pub fn set_core(&mut self, version: CanonicalVersion) {
        self.core = Some(version);
    }

    /// Inserts an individually resolved package version
    pub fn insert(&mut self, name: impl Into<String>, version: CanonicalVersion) {
        self.packages.insert(name.into(), version);
    }

    /// The shared core version, if resolved
    pub fn core(&self) -> Option<&CanonicalVersion> {
        self.core.as_ref()
    }

    /// Looks up a key directly; the reserved `"core"` key reads the shared
    /// core version
    pub fn get(&self, key: &str) -> Option<&CanonicalVersion> {
        if key == CORE_KEY {
            self.core.as_ref()
        } else {
            self.packages.get(key)
        }
    }

    /// Resolution for a manifest entry, or None when nothing was found
    ///
    /// Core entries read the shared core version; contrib entries look up
    /// their exact name. Entries outside the family never resolve.
    pub fn resolve(&self, entry: &ManifestEntry) -> Option<&CanonicalVersion> {
        match entry.category()? {
            PackageCategory::Core => self.core.as_ref(),
            PackageCategory::Contrib => self.packages.get(&entry.name),
        }
    }

    /// Returns true if a contrib package has a resolution
    pub fn is_resolved(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of individually resolved packages
    pub fn resolved_count(&self) -> usize {
        self.packages.len()
    }
}

/// Resolves the latest stable core version from a tag-based feed
///
/// Walks releases newest-first, skips prerelease records, and returns the
/// first tag that parses as a plain `[v|core-]major.minor.patch` token.
pub async fn resolve_core_version(
    feed: &dyn ReleaseFeed,
    repo: &str,
) -> Result<Option<CanonicalVersion>, FeedError> {
    let releases = feed.list_releases(repo).await?;

    Ok(releases
        .iter()
        .filter(|release| !release.prerelease)
        .find_map(|release| CanonicalVersion::from_tag(&release.tag)))
}

/// Resolves the latest stable release tag of a feed, kept verbatim
///
/// Used for the instrumentation line, whose raw tag (e.g. `v1.7.0`) flows
/// into the build descriptor unchanged.
pub async fn resolve_latest_tag(
    feed: &dyn ReleaseFeed,
    repo: &str,
) -> Result<Option<String>, FeedError> {
    let releases = feed.list_releases(repo).await?;

    Ok(releases
        .into_iter()
        .find(|release| !release.prerelease)
        .map(|release| release.tag))
}

/// Resolves contrib packages against a component-tagged feed
///
/// One listing call serves every entry: each stable `<component>-<version>`
/// tag is matched against the entries' release prefixes, newest occurrence
/// winning. Entries with no matching tag are simply absent from the result.
pub async fn resolve_contrib_versions(
    feed: &dyn ReleaseFeed,
    repo: &str,
    entries: &[ManifestEntry],
) -> Result<HashMap<String, CanonicalVersion>, FeedError> {
    let wanted: HashMap<&str, &str> = entries
        .iter()
        .filter_map(|entry| {
            crate::domain::release_prefix(&entry.name).map(|prefix| (prefix, entry.name.as_str()))
        })
        .collect();

    let mut resolved = HashMap::new();
    if wanted.is_empty() {
        return Ok(resolved);
    }

    for record in feed.list_releases(repo).await? {
        if record.prerelease {
            continue;
        }
        let Some((component, version)) = CanonicalVersion::from_composite_tag(&record.tag) else {
            continue;
        };
        if let Some(name) = wanted.get(component.as_str()) {
            resolved.entry(name.to_string()).or_insert(version);
        }
    }

    Ok(resolved)
}

/// Picks the latest entry from a flat version-index list
///
/// Versions carrying a pre-release marker are dropped first; if any survive,
/// the lexically-last survivor wins, otherwise the lexically-last unfiltered
/// entry. Comparison is lexicographic, not numeric: `1.9.0` sorts above
/// `1.10.0`.
pub fn select_index_latest(versions: &[String]) -> Option<String> {
    let stable: Vec<&String> = versions
        .iter()
        .filter(|v| !has_prerelease_marker(v))
        .collect();

    if stable.is_empty() {
        versions.iter().max().cloned()
    } else {
        stable.into_iter().max().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseRecord;
    use async_trait::async_trait;

    struct StubFeed {
        releases: Vec<ReleaseRecord>,
    }

    #[async_trait]
    impl ReleaseFeed for StubFeed {
        async fn list_releases(&self, _repo: &str) -> Result<Vec<ReleaseRecord>, FeedError> {
            Ok(self.releases.clone())
        }
    }

    struct FailingFeed;

    #[async_trait]
    impl ReleaseFeed for FailingFeed {
        async fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseRecord>, FeedError> {
            Err(FeedError::timeout(repo))
        }
    }

    fn record(tag: &str, prerelease: bool) -> ReleaseRecord {
        ReleaseRecord::new(tag, tag, format!("https://example.test/r/{}", tag))
            .with_prerelease(prerelease)
    }

    #[tokio::test]
    async fn test_resolve_core_takes_first_stable_parseable_tag() {
        let feed = StubFeed {
            releases: vec![
                record("Instrumentation.AspNetCore-1.12.0", false),
                record("core-1.10.0-rc.1", false),
                record("core-1.9.0", false),
                record("core-1.8.0", false),
            ],
        };

        let version = resolve_core_version(&feed, "owner/repo").await.unwrap();
        assert_eq!(version, Some(CanonicalVersion::new(1, 9, 0)));
    }

    #[tokio::test]
    async fn test_resolve_core_skips_prerelease_records() {
        let feed = StubFeed {
            releases: vec![record("core-2.0.0", true), record("core-1.9.0", false)],
        };

        let version = resolve_core_version(&feed, "owner/repo").await.unwrap();
        assert_eq!(version, Some(CanonicalVersion::new(1, 9, 0)));
    }

    #[tokio::test]
    async fn test_resolve_core_prerelease_only_feed_finds_nothing() {
        let feed = StubFeed {
            releases: vec![record("core-2.0.0", true), record("v1.9.0", true)],
        };

        let version = resolve_core_version(&feed, "owner/repo").await.unwrap();
        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_resolve_core_feed_order_wins_over_version_order() {
        // Feed order is trusted as newest-first; no re-sort happens.
        let feed = StubFeed {
            releases: vec![record("core-1.8.0", false), record("core-1.9.0", false)],
        };

        let version = resolve_core_version(&feed, "owner/repo").await.unwrap();
        assert_eq!(version, Some(CanonicalVersion::new(1, 8, 0)));
    }

    #[tokio::test]
    async fn test_resolve_core_propagates_transport_error() {
        let result = resolve_core_version(&FailingFeed, "owner/repo").await;
        assert!(matches!(result, Err(FeedError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_resolve_latest_tag_keeps_raw_tag() {
        let feed = StubFeed {
            releases: vec![record("v1.8.0-beta.1", true), record("v1.7.0", false)],
        };

        let tag = resolve_latest_tag(&feed, "owner/repo").await.unwrap();
        assert_eq!(tag.as_deref(), Some("v1.7.0"));
    }

    #[tokio::test]
    async fn test_resolve_contrib_matches_by_release_prefix() {
        let feed = StubFeed {
            releases: vec![
                record("Instrumentation.AspNetCore-1.12.0", false),
                record("Instrumentation.Http-1.11.1", false),
                record("Instrumentation.AspNetCore-1.11.0", false),
            ],
        };
        let entries = vec![
            ManifestEntry::new("OpenTelemetry.Instrumentation.AspNetCore", "1.11.0"),
            ManifestEntry::new("OpenTelemetry.Instrumentation.Http", "1.10.0"),
            ManifestEntry::new("OpenTelemetry.Instrumentation.Runtime", "1.5.0"),
        ];

        let resolved = resolve_contrib_versions(&feed, "owner/repo", &entries)
            .await
            .unwrap();

        assert_eq!(
            resolved.get("OpenTelemetry.Instrumentation.AspNetCore"),
            Some(&CanonicalVersion::new(1, 12, 0))
        );
        assert_eq!(
            resolved.get("OpenTelemetry.Instrumentation.Http"),
            Some(&CanonicalVersion::new(1, 11, 1))
        );
        assert!(!resolved.contains_key("OpenTelemetry.Instrumentation.Runtime"));
    }

    #[tokio::test]
    async fn test_resolve_contrib_first_occurrence_wins() {
        let feed = StubFeed {
            releases: vec![
                record("Instrumentation.Http-1.11.0", false),
                record("Instrumentation.Http-1.12.0", false),
            ],
        };
        let entries = vec![ManifestEntry::new("OpenTelemetry.Instrumentation.Http", "1.0.0")];

        let resolved = resolve_contrib_versions(&feed, "owner/repo", &entries)
            .await
            .unwrap();

        assert_eq!(
            resolved.get("OpenTelemetry.Instrumentation.Http"),
            Some(&CanonicalVersion::new(1, 11, 0))
        );
    }

    #[tokio::test]
    async fn test_resolve_contrib_ignores_core_entries() {
        let feed = StubFeed {
            releases: vec![record("Api-9.9.9", false)],
        };
        let entries = vec![ManifestEntry::new("OpenTelemetry.Api", "1.8.0")];

        let resolved = resolve_contrib_versions(&feed, "owner/repo", &entries)
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_select_index_latest_filters_prerelease_markers() {
        let versions = vec![
            "1.8.0".to_string(),
            "1.9.0".to_string(),
            "2.0.0-beta.1".to_string(),
            "2.0.0-rc.2".to_string(),
        ];
        assert_eq!(select_index_latest(&versions), Some("1.9.0".to_string()));
    }

    #[test]
    fn test_select_index_latest_falls_back_when_all_prerelease() {
        let versions = vec!["1.0.0-alpha.1".to_string(), "1.0.0-beta.2".to_string()];
        assert_eq!(
            select_index_latest(&versions),
            Some("1.0.0-beta.2".to_string())
        );
    }

    #[test]
    fn test_select_index_latest_is_lexicographic() {
        // Pinned behavior: string comparison puts 1.9.0 above 1.10.0.
        let versions = vec!["1.10.0".to_string(), "1.9.0".to_string()];
        assert_eq!(select_index_latest(&versions), Some("1.9.0".to_string()));
    }

    #[test]
    fn test_select_index_latest_empty() {
        assert_eq!(select_index_latest(&[]), None);
    }

    #[test]
    fn test_version_map_core_key_covers_core_entries() {
        let mut map = VersionMap::new();
        map.set_core(CanonicalVersion::new(1, 9, 0));
        map.insert(
            "OpenTelemetry.Instrumentation.Http",
            CanonicalVersion::new(1, 12, 0),
        );

        let core_entry = ManifestEntry::new("OpenTelemetry.Api", "1.8.0");
        let contrib_entry = ManifestEntry::new("OpenTelemetry.Instrumentation.Http", "1.11.0");
        let foreign_entry = ManifestEntry::new("Newtonsoft.Json", "13.0.3");

        assert_eq!(
            map.resolve(&core_entry),
            Some(&CanonicalVersion::new(1, 9, 0))
        );
        assert_eq!(
            map.resolve(&contrib_entry),
            Some(&CanonicalVersion::new(1, 12, 0))
        );
        assert_eq!(map.resolve(&foreign_entry), None);
    }

    #[test]
    fn test_version_map_reserved_core_key() {
        let mut map = VersionMap::new();
        map.set_core(CanonicalVersion::new(1, 9, 0));
        map.insert(
            "OpenTelemetry.Instrumentation.Http",
            CanonicalVersion::new(1, 12, 0),
        );

        assert_eq!(map.get(CORE_KEY), Some(&CanonicalVersion::new(1, 9, 0)));
        assert_eq!(
            map.get("OpenTelemetry.Instrumentation.Http"),
            Some(&CanonicalVersion::new(1, 12, 0))
        );
        assert_eq!(map.get("OpenTelemetry.Instrumentation.Runtime"), None);
    }

    #[test]
    fn test_version_map_unresolved_contrib() {
        let mut map = VersionMap::new();
        map.set_core(CanonicalVersion::new(1, 9, 0));

        let contrib_entry = ManifestEntry::new("OpenTelemetry.Instrumentation.Http", "1.11.0");
        assert_eq!(map.resolve(&contrib_entry), None);
        assert!(!map.is_resolved("OpenTelemetry.Instrumentation.Http"));
    }
}
