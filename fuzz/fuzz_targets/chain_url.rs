//! Any string accepted by the chain URL check must be on the required host
//! under the required path prefix.

#![no_main]

use ask_verify::protocol::{REQUIRED_HOST, REQUIRED_PATH_PREFIX};
use ask_verify::ChainUrlPolicy;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    if let Ok(url) = ChainUrlPolicy::default().validate(input) {
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some(REQUIRED_HOST));
        assert!(url.path().starts_with(REQUIRED_PATH_PREFIX));
        assert!(url.port().is_none() || url.port() == Some(443));
    }
});
