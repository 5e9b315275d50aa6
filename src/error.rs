//! Application error types using thiserror
//!
//! Error hierarchy:
//! - FeedError: upstream release-feed communication failures (localized to
//!   the affected lookup; callers degrade them to "not found")
//! - ManifestError: manifest or descriptor file failures (fatal for that
//!   file's update path)
//! - ConfigError: missing or invalid required input (fatal for the run)
//!
//! Tags and version strings that do not match the expected shape are not
//! errors; those paths return `Option` and skip silently.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream feed related errors
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Manifest and descriptor file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to upstream feed communication
#[derive(Error, Debug)]
pub enum FeedError {
    /// Feed or package has no usable data
    #[error("no releases found for '{feed}'")]
    NotFound { feed: String },

    /// Network request failed
    #[error("failed to fetch '{feed}': {message}")]
    Network { feed: String, message: String },

    /// Request timed out
    #[error("timeout while fetching '{feed}'")]
    Timeout { feed: String },

    /// Response could not be decoded
    #[error("invalid response from '{feed}': {message}")]
    InvalidResponse { feed: String, message: String },
}

/// Errors related to manifest and descriptor file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// File not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML document parsing error
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Errors related to required configuration input
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Core version neither passed nor resolvable
    #[error("core version required: pass --core-version or set OTEL_CORE_VERSION")]
    MissingCoreVersion,

    /// Instrumentation version neither passed nor resolvable
    #[error(
        "instrumentation version required: pass --instrumentation-version or set OTEL_INSTRUMENTATION_VERSION"
    )]
    MissingInstrumentationVersion,

    /// A version value did not parse as major.minor.patch
    #[error("invalid version '{value}': expected major.minor.patch")]
    InvalidVersion { value: String },
}

impl FeedError {
    /// Creates a new NotFound error
    pub fn not_found(feed: impl Into<String>) -> Self {
        FeedError::NotFound { feed: feed.into() }
    }

    /// Creates a new Network error
    pub fn network(feed: impl Into<String>, message: impl Into<String>) -> Self {
        FeedError::Network {
            feed: feed.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(feed: impl Into<String>) -> Self {
        FeedError::Timeout { feed: feed.into() }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(feed: impl Into<String>, message: impl Into<String>) -> Self {
        FeedError::InvalidResponse {
            feed: feed.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_not_found() {
        let err = FeedError::not_found("open-telemetry/core");
        let msg = format!("{}", err);
        assert!(msg.contains("no releases found"));
        assert!(msg.contains("open-telemetry/core"));
    }

    #[test]
    fn test_feed_error_network() {
        let err = FeedError::network("open-telemetry/core", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_feed_error_timeout() {
        let err = FeedError::timeout("open-telemetry/core");
        assert!(format!("{}", err).contains("timeout"));
    }

    #[test]
    fn test_feed_error_invalid_response() {
        let err = FeedError::invalid_response("open-telemetry/core", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid response"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_manifest_error_not_found() {
        let err = ManifestError::not_found("/dist/packages.toml");
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("packages.toml"));
    }

    #[test]
    fn test_manifest_error_parse() {
        let err = ManifestError::parse("/dist/packages.toml", "unexpected key");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse"));
        assert!(msg.contains("unexpected key"));
    }

    #[test]
    fn test_config_error_missing_core() {
        let err = ConfigError::MissingCoreVersion;
        let msg = format!("{}", err);
        assert!(msg.contains("OTEL_CORE_VERSION"));
    }

    #[test]
    fn test_config_error_invalid_version() {
        let err = ConfigError::InvalidVersion {
            value: "1.9".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version '1.9'"));
    }

    #[test]
    fn test_app_error_from_feed_error() {
        let app_err: AppError = FeedError::not_found("feed").into();
        assert!(format!("{}", app_err).contains("no releases found"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let app_err: AppError = ManifestError::not_found("/path").into();
        assert!(format!("{}", app_err).contains("manifest file not found"));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::MissingCoreVersion.into();
        assert!(format!("{}", app_err).contains("core version required"));
    }
}
