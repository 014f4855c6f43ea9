//! Protocol constants fixed by the platform.
//!
//! Not negotiated at runtime and not part of
//! [`AuthConfig`](crate::config::AuthConfig).

/// Required scheme of the certificate chain URL.
pub const REQUIRED_SCHEME: &str = "https";

/// Hostname of the platform's certificate store.
pub const REQUIRED_HOST: &str = "s3.amazonaws.com";

/// Path prefix every chain URL must start with (case-sensitive).
pub const REQUIRED_PATH_PREFIX: &str = "/echo.api/";

/// Port accepted when the chain URL names one explicitly.
pub const REQUIRED_PORT: u16 = 443;

/// Domain the signing certificate must be scoped to via its SANs.
pub const SERVICE_DOMAIN: &str = "echo-api.amazon.com";

/// Signature algorithm used by the platform (PKCS#1 v1.5).
pub const SIGNATURE_ALGORITHM: &str = "sha1WithRSAEncryption";

/// Default freshness tolerance in seconds.
pub const DEFAULT_TIMESTAMP_TOLERANCE_SECS: u64 = 30;

/// Transport header carrying the base64 request signature.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Transport header carrying the certificate chain URL.
pub const CERT_CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";
