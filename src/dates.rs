//! Date normalization and the lenient number parsing used for request input.
//!
//! Exercise dates are stored as human-readable strings (`"Mon Jan 01 2024"`),
//! so every comparison goes back through [`parse_date`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Storage and response format for exercise dates.
pub const DATE_FORMAT: &str = "%a %b %d %Y";

/// Free-form layouts accepted in addition to ISO dates and RFC 3339 timestamps.
const TEXT_FORMATS: &[&str] = &[
    DATE_FORMAT,
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn normalize(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a calendar date from user input or from a stored entry.
///
/// Returns `None` for anything unrecognized; callers decide what an
/// unparseable date means.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let unsigned = s.strip_prefix('-').unwrap_or(s);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return parse_numeric(s);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    TEXT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Up to four digits is a bare year, anything longer is milliseconds since
/// the Unix epoch.
fn parse_numeric(s: &str) -> Option<NaiveDate> {
    let n: i64 = s.parse().ok()?;
    if !s.starts_with('-') && s.len() <= 4 {
        return NaiveDate::from_ymd_opt(i32::try_from(n).ok()?, 1, 1);
    }
    DateTime::from_timestamp_millis(n).map(|dt| dt.date_naive())
}

/// Lenient integer parse: leading whitespace, an optional sign, then as many
/// digits as are present. Trailing text is ignored (`"30min"` is 30).
///
/// `None` when no digit follows the sign, or when the value overflows.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
