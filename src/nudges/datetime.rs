//! Lenient parsing for the date/time strings stored on nudge records.
//!
//! The product stores dates as `dd-MM-yyyy` and creation timestamps as
//! `dd-MM-yyyy HH:mm`, with no validation at write time. Every helper
//! here returns an Option so malformed input degrades to the documented
//! fallback instead of propagating an error.

use chrono::{NaiveDate, NaiveDateTime};

/// Format of the `date` field on fixed-date nudges.
pub const NUDGE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Format of the `createdAt` field.
pub const CREATED_AT_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Parse a `dd-MM-yyyy` nudge date.
///
/// Returns None when the string does not match the format or names an
/// invalid calendar date (e.g. `31-02-2024`).
pub fn parse_nudge_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), NUDGE_DATE_FORMAT).ok()
}

/// Parse a `dd-MM-yyyy HH:mm` creation timestamp.
pub fn parse_created_at(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), CREATED_AT_FORMAT).ok()
}

/// Sort key for ordering by creation timestamp.
///
/// Missing or unparseable timestamps map to the Unix epoch so they sort
/// as the oldest possible value without hiding the record.
pub fn created_at_sort_key(raw: Option<&str>) -> NaiveDateTime {
    raw.and_then(parse_created_at)
        .unwrap_or(NaiveDateTime::UNIX_EPOCH)
}
