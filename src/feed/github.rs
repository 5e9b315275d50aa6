//! GitHub releases feed adapter
//!
//! Fetches release listings from the GitHub REST API.
//! API endpoint: https://api.github.com/repos/{owner}/{repo}/releases
//!
//! The API returns releases newest-first; callers rely on that order and do
//! not re-sort. Unauthenticated requests are rate limited, but a single run
//! makes at most a handful of listing calls.

use crate::domain::ReleaseRecord;
use crate::error::FeedError;
use crate::feed::{HttpClient, ReleaseFeed};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// Page size for release listings
const RELEASES_PER_PAGE: u32 = 50;

/// Release feed backed by the GitHub releases API
pub struct GitHubFeed {
    client: HttpClient,
    base_url: String,
}

/// One release object from the GitHub API
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    /// Tag name, e.g. `core-1.9.0`
    tag_name: String,
    /// Release title (may be absent)
    name: Option<String>,
    /// Web URL of the release page
    html_url: String,
    /// Whether this release is flagged as a pre-release
    prerelease: bool,
    /// Release-notes body (may be absent)
    body: Option<String>,
    /// Publication timestamp (absent for drafts)
    published_at: Option<String>,
}

impl GitHubFeed {
    /// Create a new feed against the public GitHub API
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GITHUB_API_URL)
    }

    /// Create a feed against a custom base URL (used by tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the listing URL for a repository
    fn build_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/releases?per_page={}",
            self.base_url, repo, RELEASES_PER_PAGE
        )
    }
}

#[async_trait]
impl ReleaseFeed for GitHubFeed {
    async fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseRecord>, FeedError> {
        let url = self.build_url(repo);
        let releases: Vec<GitHubRelease> = self.client.get_json(&url, repo).await?;

        let records = releases
            .into_iter()
            .map(|release| ReleaseRecord {
                title: release.name.unwrap_or_else(|| release.tag_name.clone()),
                tag: release.tag_name,
                url: release.html_url,
                prerelease: release.prerelease,
                body: release.body.unwrap_or_default(),
                published_at: release
                    .published_at
                    .and_then(|ts| ts.parse::<DateTime<Utc>>().ok()),
            })
            .collect();

        Ok(records)
    }
}
