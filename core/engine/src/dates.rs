//! FILENAME: core/engine/src/dates.rs
//! PURPOSE: Date parsing and expiry-window arithmetic.
//! CONTEXT: Date fields are stored as strings in several formats depending
//! on which import path wrote them. All expiry logic ("visa expires within
//! 90 days") funnels through `days_until`, which takes an explicit `now` so
//! filters and aggregates stay pure and testable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Visa alert window: a visa expiring today through this many days out
/// (inclusive) counts as "expiring soon".
pub const VISA_ALERT_WINDOW_DAYS: i64 = 90;

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses a stored date string.
/// Accepts ISO dates, slash dates, Japanese-style dates, and RFC 3339
/// timestamps from the remote store. Returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Whole days from `now` until midnight of `expiry`, rounded up.
/// An expiry later today is 0 days away; yesterday is negative.
pub fn days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let target = expiry.and_time(NaiveTime::MIN);
    let secs = (target - now).num_seconds();
    secs.div_euclid(SECONDS_PER_DAY)
        + if secs.rem_euclid(SECONDS_PER_DAY) != 0 { 1 } else { 0 }
}

/// True when the stored date string parses and falls inside the alert
/// window `0..=VISA_ALERT_WINDOW_DAYS`. A missing or unparseable date never
/// counts as expiring.
pub fn expiring_within_window(raw: &str, now: NaiveDateTime) -> bool {
    match parse_date(raw) {
        Some(date) => {
            let days = days_until(date, now);
            (0..=VISA_ALERT_WINDOW_DAYS).contains(&days)
        }
        None => false,
    }
}
