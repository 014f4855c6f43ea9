//! Error types for request authentication.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which structural check of the certificate chain URL failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlCheck {
    /// The URL could not be parsed at all.
    Parse,
    /// Scheme is not the required secure transport.
    Scheme,
    /// Host is not the certificate store hostname.
    Host,
    /// Path does not start with the required prefix.
    Path,
    /// An explicit port other than the required one.
    Port,
}

impl fmt::Display for UrlCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Parse => "parse",
            Self::Scheme => "scheme",
            Self::Host => "host",
            Self::Path => "path",
            Self::Port => "port",
        };
        f.write_str(s)
    }
}

/// Reasons a request is rejected.
///
/// Every variant is terminal: nothing is retried inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Request timestamp outside the freshness tolerance (or unreadable).
    #[error("stale request: {detail}")]
    StaleRequest { detail: String },

    /// Chain URL failed the scheme/host/path/port check.
    #[error("untrusted certificate source ({check} check failed): {url}")]
    UntrustedCertificateSource { check: UrlCheck, url: String },

    /// Certificate could not be fetched.
    #[error("certificate unavailable: {message}")]
    CertificateUnavailable { message: String },

    /// Fetched bytes are not a usable certificate.
    #[error("malformed certificate: {message}")]
    MalformedCertificate { message: String },

    /// Evaluation instant is outside the certificate validity window.
    #[error("certificate not valid at {now}: valid from {not_before} to {not_after}")]
    ExpiredCertificate {
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// Required service domain missing from the Subject Alternative Names.
    #[error("certificate is not scoped to {domain}")]
    UntrustedCertificateScope { domain: String },

    /// Signature is not valid base64 or not a usable signature encoding.
    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// Signature does not verify over the raw body.
    #[error("signature verification failed")]
    InvalidSignature,

    /// Claimed application id absent or not allow-listed.
    #[error("application id mismatch: {}", .claimed.as_deref().unwrap_or("<missing>"))]
    ApplicationIdMismatch { claimed: Option<String> },

    /// Raw body is not a decodable request envelope.
    #[error("malformed request: {message}")]
    MalformedRequest { message: String },
}

impl AuthError {
    /// The data-free reason kind for this error.
    pub fn reason(&self) -> RejectionReason {
        match self {
            Self::StaleRequest { .. } => RejectionReason::StaleRequest,
            Self::UntrustedCertificateSource { .. } => RejectionReason::UntrustedCertificateSource,
            Self::CertificateUnavailable { .. } => RejectionReason::CertificateUnavailable,
            Self::MalformedCertificate { .. } => RejectionReason::MalformedCertificate,
            Self::ExpiredCertificate { .. } => RejectionReason::ExpiredCertificate,
            Self::UntrustedCertificateScope { .. } => RejectionReason::UntrustedCertificateScope,
            Self::MalformedSignature { .. } => RejectionReason::MalformedSignature,
            Self::InvalidSignature => RejectionReason::InvalidSignature,
            Self::ApplicationIdMismatch { .. } => RejectionReason::ApplicationIdMismatch,
            Self::MalformedRequest { .. } => RejectionReason::MalformedRequest,
        }
    }

    pub(crate) fn stale(detail: impl Into<String>) -> Self {
        Self::StaleRequest {
            detail: detail.into(),
        }
    }

    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        Self::CertificateUnavailable {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_certificate(message: impl Into<String>) -> Self {
        Self::MalformedCertificate {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_signature(reason: impl Into<String>) -> Self {
        Self::MalformedSignature {
            reason: reason.into(),
        }
    }
}

/// Stable reason kind reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    StaleRequest,
    UntrustedCertificateSource,
    CertificateUnavailable,
    MalformedCertificate,
    ExpiredCertificate,
    UntrustedCertificateScope,
    MalformedSignature,
    InvalidSignature,
    ApplicationIdMismatch,
    MalformedRequest,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaleRequest => "stale_request",
            Self::UntrustedCertificateSource => "untrusted_certificate_source",
            Self::CertificateUnavailable => "certificate_unavailable",
            Self::MalformedCertificate => "malformed_certificate",
            Self::ExpiredCertificate => "expired_certificate",
            Self::UntrustedCertificateScope => "untrusted_certificate_scope",
            Self::MalformedSignature => "malformed_signature",
            Self::InvalidSignature => "invalid_signature",
            Self::ApplicationIdMismatch => "application_id_mismatch",
            Self::MalformedRequest => "malformed_request",
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Request shape / replay
            Self::MalformedRequest => 1,
            Self::StaleRequest => 2,

            // Certificate origin
            Self::UntrustedCertificateSource => 3,

            // Certificate content
            Self::MalformedCertificate => 4,
            Self::ExpiredCertificate => 4,
            Self::UntrustedCertificateScope => 4,

            // Certificate transport
            Self::CertificateUnavailable => 5,

            // Signature
            Self::MalformedSignature => 6,
            Self::InvalidSignature => 6,

            // Routing
            Self::ApplicationIdMismatch => 7,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration errors (not request rejections).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable or config field holds an unusable value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

/// Result type for authentication stages.
pub type AuthResult<T> = Result<T, AuthError>;
