//! Upstream feed adapters
//!
//! This module provides:
//! - HTTP client shared foundation (fixed timeout, no retries)
//! - GitHub releases feed adapter (tag-based feeds)
//! - NuGet flat-container index adapter (flat version lists)

mod client;
mod github;
mod nuget;

pub use client::HttpClient;
pub use github::GitHubFeed;
pub use nuget::NuGetIndex;

use crate::domain::ReleaseRecord;
use crate::error::FeedError;
use async_trait::async_trait;

/// Trait for tag-based release feeds
///
/// Implementations return releases in feed-provided order, assumed
/// newest-first; callers depend on that order and never re-sort.
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// List all releases of a named feed, newest-first
    async fn list_releases(&self, repo: &str) -> Result<Vec<ReleaseRecord>, FeedError>;
}

/// Trait for flat package-index feeds
#[async_trait]
pub trait VersionIndex: Send + Sync {
    /// List every published version string for a package
    async fn list_versions(&self, package: &str) -> Result<Vec<String>, FeedError>;
}
