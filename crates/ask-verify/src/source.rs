//! Certificate retrieval.
//!
//! This is the ONLY network boundary in the crate. Any transport failure maps
//! to [`AuthError::CertificateUnavailable`]; there is no retry here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult, ConfigError};

const USER_AGENT_VALUE: &str = concat!("ask-verify/", env!("CARGO_PKG_VERSION"));

/// Fetches raw certificate bytes for a (validated) chain URL.
#[async_trait]
pub trait CertificateSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> AuthResult<Vec<u8>>;
}

#[async_trait]
impl<S: CertificateSource + ?Sized> CertificateSource for std::sync::Arc<S> {
    async fn fetch(&self, url: &Url) -> AuthResult<Vec<u8>> {
        (**self).fetch(url).await
    }
}

/// HTTP(S) certificate source.
#[derive(Debug, Clone)]
pub struct HttpCertificateSource {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpCertificateSource {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, ConfigError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            // A redirect would move the fetch off the validated host.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { client, max_bytes })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        Self::new(config.fetch_timeout(), config.max_certificate_bytes)
    }
}

#[async_trait]
impl CertificateSource for HttpCertificateSource {
    async fn fetch(&self, url: &Url) -> AuthResult<Vec<u8>> {
        debug!(url = %url, "fetching signing certificate");

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AuthError::unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::unavailable(format!("HTTP {}", status.as_u16())));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(AuthError::unavailable(format!(
                    "certificate too large: {} bytes",
                    len
                )));
            }
        }

        // Content-Length may be absent (chunked) or wrong, so the cap also
        // applies while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AuthError::unavailable(format!("failed to read response body: {}", e)))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(AuthError::unavailable(format!(
                    "certificate too large: more than {} bytes",
                    self.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        if body.is_empty() {
            return Err(AuthError::unavailable("empty response body"));
        }

        debug!(url = %url, bytes = body.len(), "fetched signing certificate");
        Ok(body)
    }
}

/// Serves fixed bytes regardless of URL.
///
/// Useful for tests, replaying captured requests, or an externally managed
/// cache. The bytes still go through parsing and validation on every use.
#[derive(Debug, Clone)]
pub struct StaticCertificateSource {
    bytes: Vec<u8>,
}

impl StaticCertificateSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl CertificateSource for StaticCertificateSource {
    async fn fetch(&self, _url: &Url) -> AuthResult<Vec<u8>> {
        if self.bytes.is_empty() {
            return Err(AuthError::unavailable("no certificate configured"));
        }
        Ok(self.bytes.clone())
    }
}
