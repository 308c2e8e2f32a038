//! Configuration for one sweep invocation
//!
//! Assembled once from CLI flags and environment, then only read.

use crate::engine::SweepOptions;
use crate::logging::LogLevel;
use license_sweep_common::defaults::{DEFAULT_MAX_CONCURRENCY, SEARCH_PAGE_LIMIT};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Invalid configuration value
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint override '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("Request timeout must be at least one second")]
    ZeroTimeout,
}

/// API signing key identity.
///
/// Fields may be empty here; credential loading reports what is missing.
#[derive(Debug, Clone, Default)]
pub struct CredentialConfig {
    /// Tenancy OCID
    pub tenancy: String,
    /// User OCID
    pub user: String,
    /// Fingerprint of the uploaded public key
    pub fingerprint: String,
    /// PEM private key file
    pub key_file: PathBuf,
}

/// Engine behavior
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cap on in-flight tasks per phase, 0 for no cap
    pub max_concurrency: usize,
    /// Evaluate resources without updating them
    pub dry_run: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dry_run: false,
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Per-request timeout; requests may hang forever when unset
    pub request_timeout: Option<Duration>,
    /// Base URL replacing every service endpoint
    pub endpoint_override: Option<Url>,
}

/// Configuration for a sweep
#[derive(Debug, Clone, Default)]
pub struct SweepConfig {
    pub credentials: CredentialConfig,
    /// Region hosting the identity lookup
    pub home_region: String,
    /// Raw log level setting, if any
    pub log_level: Option<String>,
    pub engine: EngineConfig,
    pub http: HttpConfig,
}

impl SweepConfig {
    /// Check values that can be rejected before any I/O
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(url) = &self.http.endpoint_override {
            check_endpoint(url)?;
        }
        Ok(())
    }

    /// Resolved log level plus the rejected raw value, if it was unrecognized
    pub fn log_level(&self) -> (LogLevel, Option<String>) {
        LogLevel::from_setting(self.log_level.as_deref())
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            max_concurrency: self.engine.max_concurrency,
            dry_run: self.engine.dry_run,
            page_limit: SEARCH_PAGE_LIMIT,
        }
    }
}

/// Parse an endpoint override such as `http://127.0.0.1:8080`
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    check_endpoint(&url)?;
    Ok(url)
}

fn check_endpoint(url: &Url) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        value: url.to_string(),
        reason: reason.to_string(),
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(())
}
