//! Request body decoding must never panic.

#![no_main]

use ask_verify::{AuthError, RequestClaims};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match RequestClaims::from_body(data) {
        Ok(_) | Err(AuthError::MalformedRequest { .. }) => {}
        Err(other) => panic!("unexpected error kind: {other:?}"),
    }
});
