//! Certificate bytes come straight from the network: parsing must never
//! panic, and a successful parse must yield a usable certificate.

#![no_main]

use ask_verify::{AuthError, Certificate, CertificateValidator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match Certificate::parse("https://s3.amazonaws.com/echo.api/fuzz.pem", data.to_vec()) {
        Ok(cert) => {
            assert!(cert.fingerprint().starts_with("sha256:"));
            let _ = cert.san_text();
            let _ = CertificateValidator::default().validate(&cert, cert.valid_from());
        }
        Err(AuthError::MalformedCertificate { .. }) => {}
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
});
