//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with a fixed timeout and
//! User-Agent. Requests are single-shot: a transport failure is reported to
//! the caller as-is and never retried, so one dead feed cannot stall the run
//! beyond its own timeout.

use crate::error::FeedError;
use reqwest::Client;
use std::time::Duration;

/// Fixed timeout for feed requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("otelup/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper for feed requests
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, FeedError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                FeedError::network("http client", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Perform a single GET request, mapping status codes to feed errors
    pub async fn get(&self, url: &str, feed: &str) -> Result<reqwest::Response, FeedError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::timeout(feed)
            } else {
                FeedError::network(feed, e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FeedError::not_found(feed));
        }

        if !response.status().is_success() {
            return Err(FeedError::network(
                feed,
                format!("HTTP {}", response.status()),
            ));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        feed: &str,
    ) -> Result<T, FeedError> {
        let response = self.get(url, feed).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| FeedError::invalid_response(feed, format!("failed to parse JSON: {}", e)))
    }
}
