//! The authentication pipeline.
//!
//! Stages run in a fixed order and the first failure ends the run:
//!
//! 1. timestamp freshness
//! 2. chain URL structure
//! 3. certificate fetch
//! 4. certificate parse
//! 5. certificate validity window, then scope
//! 6. body signature
//! 7. application id
//!
//! Nothing is cached between calls: every request fetches and parses its
//! certificate again.

use tracing::{debug, warn};

use crate::application::AllowedApplications;
use crate::certificate::Certificate;
use crate::chain_url::ChainUrlPolicy;
use crate::claims::RequestClaims;
use crate::clock::{Clock, SystemClock};
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult, ConfigError, RejectionReason};
use crate::protocol::SERVICE_DOMAIN;
use crate::signature::verify_signature;
use crate::source::{CertificateSource, HttpCertificateSource};
use crate::timestamp::TimestampGuard;
use crate::validator::CertificateValidator;

/// Everything needed to authenticate one inbound request.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticationRequest<'a> {
    /// Body bytes exactly as received.
    pub raw_body: &'a [u8],
    /// Value of the `SignatureCertChainUrl` header.
    pub chain_url: &'a str,
    /// Value of the `Signature` header (base64).
    pub signature: &'a str,
    /// Application id taken from the body.
    pub claimed_app_id: Option<&'a str>,
    /// Timestamp taken from the body.
    pub timestamp: &'a str,
    /// Application ids this endpoint serves.
    pub allowed_app_ids: &'a AllowedApplications,
}

/// Outcome of [`RequestAuthenticator::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
    Authenticated,
    Rejected(AuthError),
}

impl AuthenticationResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Authenticated => None,
            Self::Rejected(e) => Some(e.reason()),
        }
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Authenticated => None,
            Self::Rejected(e) => Some(e),
        }
    }

    pub fn into_result(self) -> AuthResult<()> {
        match self {
            Self::Authenticated => Ok(()),
            Self::Rejected(e) => Err(e),
        }
    }
}

impl From<AuthResult<()>> for AuthenticationResult {
    fn from(result: AuthResult<()>) -> Self {
        match result {
            Ok(()) => Self::Authenticated,
            Err(e) => Self::Rejected(e),
        }
    }
}

/// Authenticates inbound requests.
///
/// Holds no per-request state; one instance can serve concurrent requests
/// through `&self`.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator<S = HttpCertificateSource, C = SystemClock> {
    source: S,
    clock: C,
    url_policy: ChainUrlPolicy,
    validator: CertificateValidator,
    timestamp_guard: TimestampGuard,
    allowed: AllowedApplications,
}

impl RequestAuthenticator {
    /// HTTP certificate source and wall clock.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        let source = HttpCertificateSource::from_config(config)?;
        Ok(Self::with_collaborators(config, source, SystemClock))
    }
}

impl<S: CertificateSource, C: Clock> RequestAuthenticator<S, C> {
    pub fn with_collaborators(config: &AuthConfig, source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            url_policy: ChainUrlPolicy::default(),
            validator: CertificateValidator::new(SERVICE_DOMAIN, config.san_matching),
            timestamp_guard: TimestampGuard::new(config.timestamp_tolerance()),
            allowed: AllowedApplications::new(config.application_ids.iter().cloned()),
        }
    }

    /// Allow-list taken from the configuration.
    pub fn allowed_applications(&self) -> &AllowedApplications {
        &self.allowed
    }

    pub async fn authenticate(&self, request: &AuthenticationRequest<'_>) -> AuthenticationResult {
        match self.run(request).await {
            Ok(()) => {
                debug!(chain_url = %request.chain_url, "request authenticated");
                AuthenticationResult::Authenticated
            }
            Err(e) => reject(e),
        }
    }

    /// Authenticate a raw JSON body, reading the timestamp and application
    /// id from it and checking against the configured allow-list.
    pub async fn authenticate_body(
        &self,
        raw_body: &[u8],
        chain_url: &str,
        signature: &str,
    ) -> AuthenticationResult {
        let claims = match RequestClaims::from_body(raw_body) {
            Ok(claims) => claims,
            Err(e) => return reject(e),
        };

        let request = AuthenticationRequest {
            raw_body,
            chain_url,
            signature,
            claimed_app_id: claims.application_id.as_deref(),
            timestamp: claims.timestamp.as_deref().unwrap_or_default(),
            allowed_app_ids: &self.allowed,
        };
        self.authenticate(&request).await
    }

    async fn run(&self, request: &AuthenticationRequest<'_>) -> AuthResult<()> {
        let now = self.clock.now();

        self.timestamp_guard.check(request.timestamp, now)?;

        let url = self.url_policy.validate(request.chain_url)?;

        let raw = self.source.fetch(&url).await?;
        let certificate = Certificate::parse(url.as_str(), raw)?;
        debug!(
            fingerprint = %certificate.fingerprint(),
            subject = %certificate.subject(),
            "parsed signing certificate"
        );

        self.validator.validate(&certificate, now)?;

        verify_signature(request.raw_body, request.signature, certificate.public_key())?;

        request.allowed_app_ids.check(request.claimed_app_id)
    }
}

fn reject(e: AuthError) -> AuthenticationResult {
    warn!(reason = %e.reason(), error = %e, "request rejected");
    AuthenticationResult::Rejected(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::source::StaticCertificateSource;
    use chrono::{TimeZone, Utc};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_authenticator_is_send_sync() {
        assert_send_sync::<RequestAuthenticator>();
        assert_send_sync::<RequestAuthenticator<StaticCertificateSource, FixedClock>>();
    }

    #[test]
    fn test_result_helpers() {
        let ok = AuthenticationResult::from(Ok(()));
        assert!(ok.is_authenticated());
        assert_eq!(ok.reason(), None);

        let rejected = AuthenticationResult::Rejected(AuthError::InvalidSignature);
        assert_eq!(rejected.reason(), Some(RejectionReason::InvalidSignature));
        assert_eq!(rejected.into_result(), Err(AuthError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_malformed_body_rejected_before_fetch() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let auth = RequestAuthenticator::with_collaborators(
            &AuthConfig::default(),
            StaticCertificateSource::new(Vec::new()),
            FixedClock::new(now),
        );
        let result = auth
            .authenticate_body(
                b"{not json",
                "https://s3.amazonaws.com/echo.api/echo-api-cert.pem",
                "",
            )
            .await;
        assert_eq!(result.reason(), Some(RejectionReason::MalformedRequest));
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_stale() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let auth = RequestAuthenticator::with_collaborators(
            &AuthConfig::default(),
            StaticCertificateSource::new(Vec::new()),
            FixedClock::new(now),
        );
        let result = auth
            .authenticate_body(
                br#"{"request": {"type": "LaunchRequest"}}"#,
                "https://s3.amazonaws.com/echo.api/echo-api-cert.pem",
                "",
            )
            .await;
        assert_eq!(result.reason(), Some(RejectionReason::StaleRequest));
    }
}
