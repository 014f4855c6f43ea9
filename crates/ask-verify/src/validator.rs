//! Certificate validity window and scope checks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::certificate::Certificate;
use crate::error::{AuthError, AuthResult};
use crate::protocol::SERVICE_DOMAIN;

/// How the service domain is looked up in the Subject Alternative Names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanMatching {
    /// Substring search over the rendered SAN text
    /// (`DNS:a.example, DNS:b.example`). Matches what deployed endpoints
    /// have always accepted; `DNS:echo-api.amazon.com.evil.example` passes.
    #[default]
    Legacy,
    /// The domain must equal one DNS entry (ASCII case-insensitive).
    Exact,
}

impl fmt::Display for SanMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for SanMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "exact" => Ok(Self::Exact),
            other => Err(format!(
                "unknown SAN matching mode '{}' (expected legacy or exact)",
                other
            )),
        }
    }
}

/// Checks a parsed certificate against an evaluation instant and the
/// service domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateValidator {
    service_domain: String,
    san_matching: SanMatching,
}

impl Default for CertificateValidator {
    fn default() -> Self {
        Self::new(SERVICE_DOMAIN, SanMatching::default())
    }
}

impl CertificateValidator {
    pub fn new(service_domain: impl Into<String>, san_matching: SanMatching) -> Self {
        Self {
            service_domain: service_domain.into(),
            san_matching,
        }
    }

    pub fn service_domain(&self) -> &str {
        &self.service_domain
    }

    pub fn san_matching(&self) -> SanMatching {
        self.san_matching
    }

    /// Validity window first, then scope.
    pub fn validate(&self, cert: &Certificate, now: DateTime<Utc>) -> AuthResult<()> {
        self.check_validity(cert, now)?;
        self.check_scope(cert)
    }

    /// `valid_from <= now <= valid_to`, both ends inclusive.
    pub fn check_validity(&self, cert: &Certificate, now: DateTime<Utc>) -> AuthResult<()> {
        if now < cert.valid_from() || now > cert.valid_to() {
            return Err(AuthError::ExpiredCertificate {
                not_before: cert.valid_from(),
                not_after: cert.valid_to(),
                now,
            });
        }
        Ok(())
    }

    pub fn check_scope(&self, cert: &Certificate) -> AuthResult<()> {
        let in_scope = match self.san_matching {
            SanMatching::Legacy => cert.san_text().contains(self.service_domain.as_str()),
            SanMatching::Exact => cert
                .dns_names()
                .any(|name| name.eq_ignore_ascii_case(&self.service_domain)),
        };

        if in_scope {
            Ok(())
        } else {
            Err(AuthError::UntrustedCertificateScope {
                domain: self.service_domain.clone(),
            })
        }
    }
}
