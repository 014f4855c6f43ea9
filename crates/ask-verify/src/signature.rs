//! Request body signature verification (RSA PKCS#1 v1.5 over SHA-1).
//!
//! The signature covers the raw request bytes exactly as received. Callers
//! must not re-serialize the body before calling [`verify_signature`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha1::Sha1;

use crate::error::{AuthError, AuthResult};

/// Verify `signature_b64` over `raw_body` with the certificate's public key.
///
/// Decoding problems are [`AuthError::MalformedSignature`]; a well-formed
/// signature that does not verify is [`AuthError::InvalidSignature`].
pub fn verify_signature(
    raw_body: &[u8],
    signature_b64: &str,
    public_key: &RsaPublicKey,
) -> AuthResult<()> {
    let signature_bytes = BASE64
        .decode(signature_b64.trim())
        .map_err(|e| AuthError::malformed_signature(format!("invalid base64 signature: {}", e)))?;

    if signature_bytes.is_empty() {
        return Err(AuthError::malformed_signature("empty signature"));
    }

    if signature_bytes.len() != public_key.size() {
        return Err(AuthError::malformed_signature(format!(
            "signature is {} bytes, key modulus is {} bytes",
            signature_bytes.len(),
            public_key.size()
        )));
    }

    let signature = Signature::try_from(signature_bytes.as_slice())
        .map_err(|e| AuthError::malformed_signature(format!("invalid signature bytes: {}", e)))?;

    VerifyingKey::<Sha1>::new(public_key.clone())
        .verify(raw_body, &signature)
        .map_err(|_| AuthError::InvalidSignature)
}
