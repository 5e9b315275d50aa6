//! NuGet flat-container index adapter
//!
//! Fetches the flat version list for a package id.
//! API endpoint: https://api.nuget.org/v3-flatcontainer/{id}/index.json
//!
//! The index lowercases package ids and gives no ordering guarantee; the
//! selection rule over the returned list lives in the resolve module.

use crate::error::FeedError;
use crate::feed::{HttpClient, VersionIndex};
use async_trait::async_trait;
use serde::Deserialize;

/// NuGet flat-container base URL
const NUGET_INDEX_URL: &str = "https://api.nuget.org/v3-flatcontainer";

/// Version index backed by the NuGet flat container
pub struct NuGetIndex {
    client: HttpClient,
    base_url: String,
}

/// Flat index response
#[derive(Debug, Deserialize)]
struct IndexResponse {
    /// All published version strings for the package
    versions: Vec<String>,
}

impl NuGetIndex {
    /// Create a new index client against nuget.org
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NUGET_INDEX_URL)
    }

    /// Create an index client against a custom base URL (used by tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the index URL for a package id
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/index.json", self.base_url, package.to_lowercase())
    }
}

#[async_trait]
impl VersionIndex for NuGetIndex {
    async fn list_versions(&self, package: &str) -> Result<Vec<String>, FeedError> {
        let url = self.build_url(package);
        let response: IndexResponse = self.client.get_json(&url, package).await?;
        Ok(response.versions)
    }
}
