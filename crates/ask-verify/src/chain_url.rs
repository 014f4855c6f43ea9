//! Structural checks on the certificate chain URL.
//!
//! Pure parsing, no network access. Checks run in a fixed order (scheme,
//! host, path, port) and the first failure is reported.
//!
//! The URL is normalized by [`url::Url`] before checking: scheme and host are
//! lowercased and dot segments are resolved, so
//! `https://s3.amazonaws.com/echo.api/../other/cert.pem` is checked as
//! `/other/cert.pem` and rejected.

use url::Url;

use crate::error::{AuthError, AuthResult, UrlCheck};
use crate::protocol::{REQUIRED_HOST, REQUIRED_PATH_PREFIX, REQUIRED_PORT, REQUIRED_SCHEME};

/// Expected shape of a chain URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainUrlPolicy {
    pub scheme: String,
    pub host: String,
    pub path_prefix: String,
    pub port: u16,
}

impl Default for ChainUrlPolicy {
    fn default() -> Self {
        Self {
            scheme: REQUIRED_SCHEME.to_string(),
            host: REQUIRED_HOST.to_string(),
            path_prefix: REQUIRED_PATH_PREFIX.to_string(),
            port: REQUIRED_PORT,
        }
    }
}

impl ChainUrlPolicy {
    /// Validate `chain_url` and return it parsed.
    pub fn validate(&self, chain_url: &str) -> AuthResult<Url> {
        let reject = |check| AuthError::UntrustedCertificateSource {
            check,
            url: chain_url.to_string(),
        };

        let url = Url::parse(chain_url.trim()).map_err(|_| reject(UrlCheck::Parse))?;

        if url.scheme() != self.scheme {
            return Err(reject(UrlCheck::Scheme));
        }

        if url.host_str() != Some(self.host.as_str()) {
            return Err(reject(UrlCheck::Host));
        }

        if !url.path().starts_with(&self.path_prefix) {
            return Err(reject(UrlCheck::Path));
        }

        // `Url` drops a port equal to the scheme default, so `:443` reads as None.
        if let Some(port) = url.port() {
            if port != self.port {
                return Err(reject(UrlCheck::Port));
            }
        }

        Ok(url)
    }
}
