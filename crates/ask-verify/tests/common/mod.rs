//! Shared fixtures: a signing key, certificates built around it, and a
//! pinned clock.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use ask_verify::{
    AuthConfig, AuthResult, CertificateSource, FixedClock, RequestAuthenticator,
    StaticCertificateSource,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rcgen::{CertificateParams, DnType, KeyPair};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use url::Url;

pub const CHAIN_URL: &str = "https://s3.amazonaws.com/echo.api/echo-api-cert-4.pem";
pub const APP_ID: &str = "amzn1.ask.skill.xyz";
pub const OTHER_APP_ID: &str = "amzn1.ask.skill.abc";
pub const SERVICE_DOMAIN: &str = "echo-api.amazon.com";

/// Evaluation instant for every test.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn timestamp_at(offset_secs: i64) -> String {
    (now() + TimeDelta::seconds(offset_secs)).to_rfc3339()
}

/// RSA-2048: the smallest size the certificate builder will sign with.
pub fn signing_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap())
}

pub fn other_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap())
}

/// What the test certificate should look like.
#[derive(Debug, Clone)]
pub struct CertTemplate {
    pub sans: Vec<String>,
    pub not_before: (i32, u8, u8),
    pub not_after: (i32, u8, u8),
}

impl Default for CertTemplate {
    fn default() -> Self {
        Self {
            sans: vec![SERVICE_DOMAIN.to_string()],
            not_before: (2026, 1, 1),
            not_after: (2026, 12, 31),
        }
    }
}

impl CertTemplate {
    pub fn with_sans(mut self, sans: &[&str]) -> Self {
        self.sans = sans.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn valid_between(mut self, not_before: (i32, u8, u8), not_after: (i32, u8, u8)) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }
}

pub fn build_certificate_with(template: &CertTemplate, key: &RsaPrivateKey) -> rcgen::Certificate {
    let key_pem = key.to_pkcs8_pem(LineEnding::LF).unwrap();
    let key_pair = KeyPair::from_pem(key_pem.as_str()).unwrap();

    let mut params = CertificateParams::new(template.sans.clone()).unwrap();
    params
        .distinguished_name
        .push(DnType::CommonName, SERVICE_DOMAIN);
    let (year, month, day) = template.not_before;
    params.not_before = rcgen::date_time_ymd(year, month, day);
    let (year, month, day) = template.not_after;
    params.not_after = rcgen::date_time_ymd(year, month, day);
    params.self_signed(&key_pair).unwrap()
}

pub fn build_certificate(template: &CertTemplate) -> rcgen::Certificate {
    build_certificate_with(template, signing_key())
}

pub fn certificate_pem(template: &CertTemplate) -> String {
    build_certificate(template).pem()
}

pub fn valid_certificate_pem() -> String {
    certificate_pem(&CertTemplate::default())
}

pub fn sign_with(body: &[u8], key: &RsaPrivateKey) -> String {
    let signing_key = SigningKey::<Sha1>::new(key.clone());
    BASE64.encode(signing_key.sign(body).to_vec())
}

pub fn sign(body: &[u8]) -> String {
    sign_with(body, signing_key())
}

/// A minimal request envelope.
pub fn request_body(timestamp: &str, app_id: &str) -> String {
    format!(
        r#"{{"version":"1.0","session":{{"new":true,"sessionId":"amzn1.echo-api.session.1","application":{{"applicationId":"{app_id}"}}}},"request":{{"type":"LaunchRequest","requestId":"amzn1.echo-api.request.1","timestamp":"{timestamp}","locale":"en-US"}}}}"#
    )
}

pub fn config() -> AuthConfig {
    AuthConfig::default().with_application_ids([APP_ID])
}

pub fn authenticator(
    cert: impl Into<Vec<u8>>,
) -> RequestAuthenticator<StaticCertificateSource, FixedClock> {
    RequestAuthenticator::with_collaborators(
        &config(),
        StaticCertificateSource::new(cert),
        FixedClock::new(now()),
    )
}

/// Serves fixed bytes and counts fetches.
#[derive(Debug, Clone, Default)]
pub struct CountingSource {
    bytes: Vec<u8>,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CertificateSource for CountingSource {
    async fn fetch(&self, url: &Url) -> AuthResult<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        StaticCertificateSource::new(self.bytes.clone())
            .fetch(url)
            .await
    }
}
