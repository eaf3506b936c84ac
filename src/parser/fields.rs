//! Cell-level parsing of date and demand fields
//!
//! Both functions trim their input and return `None` on failure; the row
//! parser turns a `None` into a skipped row.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time layouts without an offset
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts carrying a `±HH:MM` offset
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Whether `text` starts with a zero-padded `YYYY-MM-DD` date
///
/// chrono's `%Y`, `%m` and `%d` also accept signed, extended and unpadded
/// numbers, so the layout is checked before handing the text over.
fn has_iso_date_prefix(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    let shape_ok = bytes[..10].iter().enumerate().all(|(idx, b)| match idx {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    shape_ok && matches!(bytes.get(10), None | Some(b'T' | b't' | b' '))
}

/// Parse an ISO-8601 date or date-time cell
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and a time of
/// day, optionally followed by `Z` or a `±HH:MM` offset. Offsets are dropped
/// after parsing and the wall-clock time is kept.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if !has_iso_date_prefix(text) {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Some(ts) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(ts);
    }

    let with_offset = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(stripped) => format!("{stripped}+00:00"),
        None => text.to_string(),
    };

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
        .map(|ts| ts.naive_local())
}

/// Parse a demand cell as a finite real number
#[must_use]
pub fn parse_demand(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
