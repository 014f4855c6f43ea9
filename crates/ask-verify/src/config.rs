//! Authenticator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::protocol::DEFAULT_TIMESTAMP_TOLERANCE_SECS;
use crate::validator::SanMatching;

/// Caller-side configuration for [`RequestAuthenticator`](crate::RequestAuthenticator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Application ids this endpoint serves.
    #[serde(default)]
    pub application_ids: Vec<String>,

    /// Maximum allowed difference between the request timestamp and now.
    #[serde(default = "default_tolerance")]
    pub timestamp_tolerance_secs: u64,

    /// Timeout for the certificate fetch.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Upper bound on the certificate chain size.
    #[serde(default = "default_max_certificate_bytes")]
    pub max_certificate_bytes: usize,

    /// How the service domain is matched against the SANs.
    #[serde(default)]
    pub san_matching: SanMatching,
}

fn default_tolerance() -> u64 {
    DEFAULT_TIMESTAMP_TOLERANCE_SECS
}

fn default_fetch_timeout() -> u64 {
    5
}

fn default_max_certificate_bytes() -> usize {
    256 * 1024
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            application_ids: Vec::new(),
            timestamp_tolerance_secs: default_tolerance(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_certificate_bytes: default_max_certificate_bytes(),
            san_matching: SanMatching::default(),
        }
    }
}

impl AuthConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `ASK_VERIFY_APPLICATION_IDS` | Comma-separated allow-list |
    /// | `ASK_VERIFY_TIMESTAMP_TOLERANCE` | Freshness tolerance in seconds |
    /// | `ASK_VERIFY_FETCH_TIMEOUT` | Certificate fetch timeout in seconds |
    /// | `ASK_VERIFY_MAX_CERTIFICATE_BYTES` | Certificate size cap |
    /// | `ASK_VERIFY_SAN_MATCHING` | `legacy` or `exact` |
    ///
    /// Unset variables keep their defaults; set but unparseable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("ASK_VERIFY_APPLICATION_IDS") {
            cfg.application_ids = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(v) = env_parse("ASK_VERIFY_TIMESTAMP_TOLERANCE")? {
            cfg.timestamp_tolerance_secs = v;
        }

        if let Some(v) = env_parse("ASK_VERIFY_FETCH_TIMEOUT")? {
            cfg.fetch_timeout_secs = v;
        }

        if let Some(v) = env_parse("ASK_VERIFY_MAX_CERTIFICATE_BYTES")? {
            cfg.max_certificate_bytes = v;
        }

        if let Ok(v) = std::env::var("ASK_VERIFY_SAN_MATCHING") {
            cfg.san_matching = v.parse().map_err(|message| ConfigError::InvalidValue {
                key: "ASK_VERIFY_SAN_MATCHING".to_string(),
                message,
            })?;
        }

        Ok(cfg)
    }

    /// Set the application id allow-list.
    pub fn with_application_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.application_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the freshness tolerance.
    pub fn with_timestamp_tolerance(mut self, secs: u64) -> Self {
        self.timestamp_tolerance_secs = secs;
        self
    }

    /// Set the SAN matching mode.
    pub fn with_san_matching(mut self, mode: SanMatching) -> Self {
        self.san_matching = mode;
        self
    }

    pub fn timestamp_tolerance(&self) -> Duration {
        Duration::from_secs(self.timestamp_tolerance_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
