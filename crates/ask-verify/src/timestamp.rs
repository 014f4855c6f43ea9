//! Request freshness (replay window).

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::error::{AuthError, AuthResult};
use crate::protocol::DEFAULT_TIMESTAMP_TOLERANCE_SECS;

/// Rejects requests whose embedded timestamp is too far from now.
///
/// The window is symmetric: a timestamp in the future is treated the same as
/// one in the past. A difference exactly equal to the tolerance passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampGuard {
    tolerance: Duration,
}

impl Default for TimestampGuard {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMESTAMP_TOLERANCE_SECS))
    }
}

impl TimestampGuard {
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Parse `embedded` and check it against `now`.
    ///
    /// An unreadable timestamp is a [`AuthError::StaleRequest`].
    pub fn check(&self, embedded: &str, now: DateTime<Utc>) -> AuthResult<DateTime<Utc>> {
        let timestamp = parse_timestamp(embedded)
            .ok_or_else(|| AuthError::stale(format!("unreadable timestamp {:?}", embedded)))?;
        self.check_instant(timestamp, now)?;
        Ok(timestamp)
    }

    pub fn check_instant(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> AuthResult<()> {
        let skew = now.signed_duration_since(timestamp).abs();
        // A tolerance beyond TimeDelta's range admits every representable skew.
        let Ok(tolerance) = TimeDelta::from_std(self.tolerance) else {
            return Ok(());
        };

        if skew > tolerance {
            return Err(AuthError::stale(format!(
                "timestamp {} is {}us from now ({}), tolerance {}s",
                timestamp.to_rfc3339(),
                skew.num_microseconds().unwrap_or(i64::MAX),
                now.to_rfc3339(),
                self.tolerance.as_secs()
            )));
        }
        Ok(())
    }
}

/// ISO-8601 with offset (`2026-03-01T12:00:00Z`), or without one, read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
