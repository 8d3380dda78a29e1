//! Shared helpers used by every response parser.

use chrono::{DateTime, TimeZone, Utc};

/// Wall-clock time for a single parse invocation's `last_seen` stamp.
pub(super) fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a unix-epoch-seconds timestamp into a `DateTime<Utc>`, per the
/// shared parser rule: zero or negative is not materialised.
pub(super) fn epoch_secs_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    Utc.timestamp_opt(secs, 0).single()
}

/// Parse an RFC3339 timestamp string, discarding anything unparseable.
pub(super) fn rfc3339_to_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `owned_by → publisher` mapping shared by the OpenAI-shaped adapters:
/// suppress the value when it's empty or equal to one of the provider's own
/// self-referential tags (e.g. llama.cpp entries that just say `"llamacpp"`).
pub(super) fn publisher_from_owned_by(owned_by: Option<&str>, suppress: &[&str]) -> Option<String> {
    let owned_by = owned_by?;
    if owned_by.is_empty() || suppress.contains(&owned_by) {
        return None;
    }
    Some(owned_by.to_string())
}
