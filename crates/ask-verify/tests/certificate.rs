//! Certificate parsing and validation against generated certificates.

mod common;

use ask_verify::{AuthError, Certificate, CertificateValidator, SanEntry, SanMatching};
use chrono::{TimeZone, Utc};
use common::*;
use rsa::traits::PublicKeyParts;

fn parse(bytes: impl Into<Vec<u8>>) -> Result<Certificate, AuthError> {
    Certificate::parse(CHAIN_URL, bytes.into())
}

#[test]
fn test_parse_extracts_fields() {
    let template = CertTemplate::default().with_sans(&[SERVICE_DOMAIN, "www.example.com"]);
    let pem = certificate_pem(&template);
    let cert = parse(pem.clone()).unwrap();

    assert_eq!(cert.source_url(), CHAIN_URL);
    assert_eq!(cert.raw_bytes(), pem.as_bytes());
    assert_eq!(
        cert.valid_from(),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        cert.valid_to(),
        Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()
    );
    assert_eq!(
        cert.subject_alternative_names(),
        &[
            SanEntry::Dns(SERVICE_DOMAIN.to_string()),
            SanEntry::Dns("www.example.com".to_string())
        ]
    );
    assert_eq!(
        cert.san_text(),
        "DNS:echo-api.amazon.com, DNS:www.example.com"
    );
    assert!(cert.subject().contains(SERVICE_DOMAIN));
    assert_eq!(cert.public_key().n(), signing_key().n());
}

#[test]
fn test_fingerprint_is_stable_across_encodings() {
    let built = build_certificate(&CertTemplate::default());
    let from_pem = parse(built.pem()).unwrap();
    let from_der = parse(built.der().to_vec()).unwrap();

    assert!(from_pem.fingerprint().starts_with("sha256:"));
    assert_eq!(from_pem.fingerprint().len(), "sha256:".len() + 64);
    assert_eq!(from_pem.fingerprint(), from_der.fingerprint());
}

#[test]
fn test_ip_san_rendering() {
    let cert = parse(certificate_pem(
        &CertTemplate::default().with_sans(&[SERVICE_DOMAIN, "10.0.0.1"]),
    ))
    .unwrap();
    assert_eq!(
        cert.san_text(),
        "DNS:echo-api.amazon.com, IP Address:10.0.0.1"
    );
    assert_eq!(cert.dns_names().collect::<Vec<_>>(), vec![SERVICE_DOMAIN]);
}

#[test]
fn test_missing_san_extension_is_empty() {
    let cert = parse(certificate_pem(&CertTemplate::default().with_sans(&[]))).unwrap();
    assert!(cert.subject_alternative_names().is_empty());
    assert_eq!(cert.san_text(), "");
}

#[test]
fn test_trailing_der_bytes_rejected() {
    let mut der = build_certificate(&CertTemplate::default()).der().to_vec();
    der.push(0x00);
    assert!(matches!(
        parse(der),
        Err(AuthError::MalformedCertificate { .. })
    ));
}

#[test]
fn test_truncated_der_rejected() {
    let der = build_certificate(&CertTemplate::default()).der().to_vec();
    for len in [1, 16, der.len() / 2, der.len() - 1] {
        assert!(
            matches!(
                parse(der[..len].to_vec()),
                Err(AuthError::MalformedCertificate { .. })
            ),
            "prefix of {len} bytes"
        );
    }
}

#[test]
fn test_non_rsa_key_rejected() {
    let key_pair = rcgen::KeyPair::generate().unwrap();
    let cert = rcgen::CertificateParams::new(vec![SERVICE_DOMAIN.to_string()])
        .unwrap()
        .self_signed(&key_pair)
        .unwrap();

    match parse(cert.pem()) {
        Err(AuthError::MalformedCertificate { message }) => {
            assert!(message.contains("RSA"), "{message}")
        }
        other => panic!("expected MalformedCertificate, got {other:?}"),
    }
}

#[test]
fn test_validity_window_is_inclusive() {
    let cert = parse(valid_certificate_pem()).unwrap();
    let validator = CertificateValidator::default();

    validator.check_validity(&cert, cert.valid_from()).unwrap();
    validator.check_validity(&cert, cert.valid_to()).unwrap();

    let before = cert.valid_from() - chrono::TimeDelta::seconds(1);
    let after = cert.valid_to() + chrono::TimeDelta::seconds(1);
    assert!(matches!(
        validator.check_validity(&cert, before),
        Err(AuthError::ExpiredCertificate { .. })
    ));
    assert!(matches!(
        validator.check_validity(&cert, after),
        Err(AuthError::ExpiredCertificate { .. })
    ));
}

#[test]
fn test_scope_matching() {
    let lookalike = parse(certificate_pem(
        &CertTemplate::default().with_sans(&["echo-api.amazon.com.evil.example"]),
    ))
    .unwrap();
    let upper = parse(certificate_pem(
        &CertTemplate::default().with_sans(&["ECHO-API.AMAZON.COM"]),
    ))
    .unwrap();

    let legacy = CertificateValidator::new(SERVICE_DOMAIN, SanMatching::Legacy);
    let exact = CertificateValidator::new(SERVICE_DOMAIN, SanMatching::Exact);

    assert!(legacy.check_scope(&lookalike).is_ok());
    assert_eq!(
        exact.check_scope(&lookalike),
        Err(AuthError::UntrustedCertificateScope {
            domain: SERVICE_DOMAIN.to_string()
        })
    );

    // Legacy containment is case-sensitive; exact DNS comparison is not.
    assert!(legacy.check_scope(&upper).is_err());
    assert!(exact.check_scope(&upper).is_ok());
}
