pub mod check_url;
mod dispatch;
pub mod inspect_cert;
pub mod verify;

pub use dispatch::dispatch;

use anyhow::Context;
use chrono::{DateTime, Utc};

/// Parse an `--at` value.
pub(crate) fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid --at instant '{}' (expected RFC 3339)", raw))
}

/// Print a rejection and return its exit code.
pub(crate) fn report_rejection(err: &ask_verify::AuthError, json: bool) -> i32 {
    let reason = err.reason();
    if json {
        let out = serde_json::json!({
            "ok": false,
            "reason": reason,
            "message": err.to_string(),
        });
        println!("{}", out);
    } else {
        println!("rejected ({}): {}", reason, err);
    }
    reason.exit_code()
}
