//! Request authentication for voice-assistant skill endpoints.
//!
//! Every inbound request carries a signature over its raw body and the URL of
//! the signing certificate chain. This crate decides whether a request is
//! authentic, fresh and addressed to this endpoint:
//!
//! - chain URL structure (scheme, host, path prefix, port)
//! - certificate fetch and parse (PEM chain or DER)
//! - certificate validity window and Subject Alternative Name scope
//! - RSA PKCS#1 v1.5 / SHA-1 signature over the exact body bytes
//! - timestamp freshness (replay window)
//! - application id allow-list
//!
//! # Quick Start
//!
//! ```no_run
//! use ask_verify::{AuthConfig, RequestAuthenticator};
//!
//! # async fn example(body: &[u8], chain_url: &str, signature: &str) -> anyhow::Result<()> {
//! let config = AuthConfig::from_env()?;
//! let authenticator = RequestAuthenticator::new(&config)?;
//!
//! let outcome = authenticator
//!     .authenticate_body(body, chain_url, signature)
//!     .await;
//! if let Some(reason) = outcome.reason() {
//!     println!("rejected: {}", reason);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `ASK_VERIFY_APPLICATION_IDS` | Comma-separated application id allow-list |
//! | `ASK_VERIFY_TIMESTAMP_TOLERANCE` | Freshness tolerance in seconds (default: 30) |
//! | `ASK_VERIFY_FETCH_TIMEOUT` | Certificate fetch timeout in seconds (default: 5) |
//! | `ASK_VERIFY_MAX_CERTIFICATE_BYTES` | Certificate size cap (default: 262144) |
//! | `ASK_VERIFY_SAN_MATCHING` | `legacy` (default) or `exact` |

pub mod application;
pub mod authenticator;
pub mod certificate;
pub mod chain_url;
pub mod claims;
pub mod clock;
pub mod config;
pub mod error;
pub mod protocol;
pub mod signature;
pub mod source;
pub mod timestamp;
pub mod validator;

// Re-export main types
pub use application::AllowedApplications;
pub use authenticator::{AuthenticationRequest, AuthenticationResult, RequestAuthenticator};
pub use certificate::{Certificate, SanEntry};
pub use chain_url::ChainUrlPolicy;
pub use claims::RequestClaims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult, ConfigError, RejectionReason, UrlCheck};
pub use signature::verify_signature;
pub use source::{CertificateSource, HttpCertificateSource, StaticCertificateSource};
pub use timestamp::TimestampGuard;
pub use validator::{CertificateValidator, SanMatching};
