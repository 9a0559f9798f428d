//! Wall-clock helpers for the display timezone.
//!
//! Everything is stored in UTC; labels and form input (`HH:mm`) live in the
//! event's display timezone.

use chrono::{DateTime, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, UnconfError};

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| UnconfError::InvalidTimezone(name.to_string()))
}

/// Render an instant as `HH:mm` in `tz`.
pub fn format_hhmm(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

/// Resolve an `HH:mm` wall-clock time on the calendar date that `anchor`
/// falls on in `tz`.
///
/// Returns `None` for malformed input and for wall-clock times skipped by a
/// DST transition. Ambiguous times resolve to the earlier instant.
pub fn local_time_on(anchor: DateTime<Utc>, hhmm: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(hhmm.trim(), "%H:%M").ok()?;
    let date = anchor.with_timezone(&tz).date_naive();
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Parse an RFC 3339 instant, or a naive `YYYY-MM-DDTHH:MM:SS` interpreted in
/// `tz`.
pub fn parse_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| UnconfError::InvalidDateTime(format!("'{}': {}", s, e)))?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => Err(UnconfError::InvalidDateTime(format!(
            "'{}' does not exist in {}",
            s, tz
        ))),
    }
}
