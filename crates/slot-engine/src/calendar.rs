//! Calendar-date parsing for booking requests.
//!
//! Date pickers hand over ISO strings, sometimes with a local-midnight suffix
//! (`2026-03-18T00:00:00`) appended to dodge UTC parsing. Dates here are naive
//! year/month/day triples and the weekday is derived from the triple itself,
//! so no timezone offset can move a Wednesday onto a Tuesday.

use chrono::{NaiveDate, Weekday};

use crate::error::{Result, SlotError};

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDT00:00:00` into a calendar date.
///
/// # Errors
/// Returns `SlotError::InvalidDate` if the text is not a zero-padded ISO
/// date, names a day that does not exist (e.g. `2026-02-30`), or carries a
/// time other than midnight.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let date_part = match input.split_once('T') {
        Some((date, time)) => {
            if !matches!(time, "00:00" | "00:00:00") {
                return Err(SlotError::InvalidDate(format!(
                    "'{}' has a time component other than midnight",
                    input
                )));
            }
            date
        }
        None => input,
    };

    if !is_padded_iso(date_part) {
        return Err(SlotError::InvalidDate(format!(
            "'{}' is not a zero-padded YYYY-MM-DD date",
            input
        )));
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", input, e)))
}

/// `%Y-%m-%d` alone also takes `2026-3-8`; booking forms always pad.
fn is_padded_iso(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Full English name of a weekday (`"Wednesday"`).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
