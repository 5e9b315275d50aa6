//! Run configuration
//!
//! Environment-sourced values collected into one explicit struct handed to
//! the entry point. CLI flags override the environment. Required-value
//! enforcement happens per command through the `require_*` accessors.

use crate::domain::CanonicalVersion;
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;

/// Environment variable carrying the target core version
pub const CORE_VERSION_ENV: &str = "OTEL_CORE_VERSION";

/// Environment variable carrying the target instrumentation release tag
pub const INSTRUMENTATION_VERSION_ENV: &str = "OTEL_INSTRUMENTATION_VERSION";

/// Environment variable naming the CI output file
pub const CI_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Explicit configuration for one run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Target core version
    pub core_version: Option<CanonicalVersion>,
    /// Target instrumentation release tag, kept verbatim (e.g. `v1.7.0`)
    pub instrumentation_version: Option<String>,
    /// CI output sink, when one is configured
    pub output_sink: Option<PathBuf>,
}

impl Config {
    /// Builds a configuration from the process environment
    ///
    /// An `OTEL_CORE_VERSION` that does not parse as a bare triple is a
    /// fatal input error, not a silent skip.
    pub fn from_env() -> Result<Self, ConfigError> {
        let core_version = match env::var(CORE_VERSION_ENV) {
            Ok(value) if !value.is_empty() => Some(
                CanonicalVersion::parse(&value).ok_or(ConfigError::InvalidVersion { value })?,
            ),
            _ => None,
        };

        let instrumentation_version = env::var(INSTRUMENTATION_VERSION_ENV)
            .ok()
            .filter(|v| !v.is_empty());

        let output_sink = env::var(CI_OUTPUT_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            core_version,
            instrumentation_version,
            output_sink,
        })
    }

    /// Applies CLI overrides on top of the environment values
    pub fn with_overrides(
        mut self,
        core_version: Option<&str>,
        instrumentation_version: Option<&str>,
        output_sink: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = core_version {
            self.core_version = Some(CanonicalVersion::parse(value).ok_or_else(|| {
                ConfigError::InvalidVersion {
                    value: value.to_string(),
                }
            })?);
        }
        if let Some(value) = instrumentation_version {
            self.instrumentation_version = Some(value.to_string());
        }
        if let Some(path) = output_sink {
            self.output_sink = Some(path);
        }
        Ok(self)
    }

    /// The core version, or the fatal missing-input error
    pub fn require_core_version(&self) -> Result<&CanonicalVersion, ConfigError> {
        self.core_version
            .as_ref()
            .ok_or(ConfigError::MissingCoreVersion)
    }

    /// The instrumentation tag, or the fatal missing-input error
    pub fn require_instrumentation_version(&self) -> Result<&str, ConfigError> {
        self.instrumentation_version
            .as_deref()
            .ok_or(ConfigError::MissingInstrumentationVersion)
    }
}
