//! Date helper functions

use chrono::format::StrftimeItems;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Parse a date string in various formats
///
/// Dates are kept naive: a front-matter `date: 2024-01-15` is displayed as
/// that calendar day regardless of the local timezone.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 keeps the wall-clock time it was written with
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    None
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY. MM. DD") // -> Some("2024. 01. 15")
/// ```
///
/// Returns `None` if chrono cannot render the converted format.
pub fn format_date(date: &NaiveDateTime, format: &str) -> Option<String> {
    let chrono_format = moment_to_chrono_format(format);
    let items = StrftimeItems::new(&chrono_format);

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items)).ok()?;
    Some(out)
}

/// Parse `s` and format it, or `None` if it isn't a recognisable date
pub fn format_date_str(s: &str, format: &str) -> Option<String> {
    parse_date_string(s).and_then(|date| format_date(&date, format))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each category
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    // Literal percent signs must not reach chrono as specifiers
    let mut result = format.replace('%', "%%");

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
