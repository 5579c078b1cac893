//! Timestamp normalization for chat export headers.
//!
//! Export headers carry a slash-separated date and a clock time, e.g.
//! `12/08/23, 14:05` or `8/12/2023, 2:05 PM`. This module turns that raw
//! prefix into a [`chrono::NaiveDateTime`] (exports carry no timezone).
//!
//! # Date order is configuration, not detection
//!
//! `12/08/23` is 12 August under a day-first locale and 8 December under a
//! month-first one. The export itself does not say which convention it used,
//! so the order is a fixed, caller-declared choice ([`DateOrder`], default
//! [`DateOrder::DayFirst`]). Exports that mix conventions are a known
//! limitation and are not corrected.
//!
//! # Rules
//!
//! - Two-digit years mean `2000 + yy` (`99` is 2099, not 1999).
//! - A 12-hour time requires an AM/PM marker; no marker means 24-hour.
//! - Seconds are optional and default to 0.
//!
//! # Example
//!
//! ```rust
//! use chatlens::timestamp::{DateOrder, parse_header_timestamp};
//! use chrono::{Datelike, Timelike};
//!
//! let ts = parse_header_timestamp("12/08/23", "2:05 PM", DateOrder::DayFirst).unwrap();
//! assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 8, 12));
//! assert_eq!((ts.hour(), ts.minute()), (14, 5));
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a raw date/time prefix fails normalization.
///
/// During a full parse this is recovered (the line is treated as a
/// continuation or discarded, and counted); it is only fatal when the
/// normalizer is called directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date/time prefix '{raw}'")]
pub struct TimestampError {
    raw: String,
}

impl TimestampError {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw prefix that failed to normalize.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Which calendar field comes first in a slash-separated date.
///
/// A fixed convention: the parser never tries to guess it from the data.
///
/// # Example
///
/// ```rust
/// use chatlens::timestamp::DateOrder;
/// use std::str::FromStr;
///
/// assert_eq!(DateOrder::default(), DateOrder::DayFirst);
/// assert_eq!(DateOrder::from_str("month-first").unwrap(), DateOrder::MonthFirst);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `D/M/Y`: `12/08/23` is 12 August 2023. The default.
    #[default]
    DayFirst,
    /// `M/D/Y`: `12/08/23` is 8 December 2023.
    MonthFirst,
}

impl DateOrder {
    /// Maps the first two slash-separated fields to `(day, month)`.
    fn day_month(self, first: u32, second: u32) -> (u32, u32) {
        match self {
            DateOrder::DayFirst => (first, second),
            DateOrder::MonthFirst => (second, first),
        }
    }
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateOrder::DayFirst => write!(f, "day-first"),
            DateOrder::MonthFirst => write!(f, "month-first"),
        }
    }
}

impl std::str::FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-first" | "dayfirst" | "dmy" => Ok(DateOrder::DayFirst),
            "month-first" | "monthfirst" | "mdy" => Ok(DateOrder::MonthFirst),
            _ => Err(format!(
                "Unknown date order: '{}'. Expected one of: day-first, month-first",
                s
            )),
        }
    }
}

/// Time-of-day formats tried in order. Seconds-bearing variants first so a
/// trailing `:SS` is never left unconsumed; 12-hour variants require the
/// AM/PM marker to match at all.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%I:%M:%S %p", "%H:%M", "%I:%M %p"];

/// Normalizes one header date/time prefix into calendar fields.
///
/// `date` is the slash-separated date capture (`12/08/23`), `time` the clock
/// capture (`14:05`, `2:05:09 PM`). Non-breaking spaces that some exports
/// place before the AM/PM marker are normalized away first.
///
/// # Errors
///
/// Returns [`TimestampError`] when the fields do not form a real calendar
/// date (`31/02/23`), the time matches no accepted format, or the date does
/// not have exactly three numeric fields.
///
/// # Example
///
/// ```rust
/// use chatlens::timestamp::{DateOrder, parse_header_timestamp};
/// use chrono::Datelike;
///
/// // Same raw prefix, both conventions:
/// let dmy = parse_header_timestamp("12/08/23", "14:05", DateOrder::DayFirst).unwrap();
/// let mdy = parse_header_timestamp("12/08/23", "14:05", DateOrder::MonthFirst).unwrap();
/// assert_eq!((dmy.day(), dmy.month()), (12, 8));
/// assert_eq!((mdy.day(), mdy.month()), (8, 12));
/// ```
pub fn parse_header_timestamp(
    date: &str,
    time: &str,
    order: DateOrder,
) -> Result<NaiveDateTime, TimestampError> {
    let raw = || format!("{date}, {time}");

    let mut fields = [0u32; 3];
    let mut count = 0;
    for part in date.trim().split('/') {
        if count == 3 {
            return Err(TimestampError::new(raw()));
        }
        fields[count] = part
            .trim()
            .parse::<u32>()
            .map_err(|_| TimestampError::new(raw()))?;
        count += 1;
    }
    if count != 3 {
        return Err(TimestampError::new(raw()));
    }

    let (day, month) = order.day_month(fields[0], fields[1]);
    // Two-digit years are twenty-first century by contract: 99 is 2099.
    let year = if fields[2] < 100 {
        2000 + fields[2]
    } else {
        fields[2]
    };

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimestampError::new(raw()))?;

    // iOS exports separate the AM/PM marker with U+202F or U+00A0.
    let cleaned: String = time
        .trim()
        .chars()
        .map(|c| {
            if c == '\u{202f}' || c == '\u{00a0}' {
                ' '
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.to_uppercase();

    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&cleaned, fmt).ok())
        .ok_or_else(|| TimestampError::new(raw()))?;

    Ok(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_day_first_default() {
        let ts = parse_header_timestamp("12/08/23", "14:05", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.month(), 8);
        assert_eq!(ts.day(), 12);
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.minute(), 5);
        assert_eq!(ts.second(), 0);
    }

    #[test]
    fn test_month_first() {
        let ts = parse_header_timestamp("12/08/23", "14:05", DateOrder::MonthFirst).unwrap();
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.day(), 8);
    }

    #[test]
    fn test_two_digit_year_is_2000_plus() {
        let ts = parse_header_timestamp("31/12/99", "23:59", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.year(), 2099);

        let ts = parse_header_timestamp("1/1/00", "0:00", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.year(), 2000);
    }

    #[test]
    fn test_four_digit_year_passes_through() {
        let ts = parse_header_timestamp("12/08/2023", "14:05", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.year(), 2023);
    }

    #[test]
    fn test_single_digit_fields() {
        let ts = parse_header_timestamp("1/2/23", "9:07", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.day(), 1);
        assert_eq!(ts.month(), 2);
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.minute(), 7);
    }

    #[test]
    fn test_seconds_accepted_and_optional() {
        let with = parse_header_timestamp("12/08/23", "14:05:42", DateOrder::DayFirst).unwrap();
        assert_eq!(with.second(), 42);

        let without = parse_header_timestamp("12/08/23", "14:05", DateOrder::DayFirst).unwrap();
        assert_eq!(without.second(), 0);
    }

    #[test]
    fn test_twelve_hour_requires_marker() {
        let pm = parse_header_timestamp("12/08/23", "2:05 PM", DateOrder::DayFirst).unwrap();
        assert_eq!(pm.hour(), 14);

        let am = parse_header_timestamp("12/08/23", "12:05 AM", DateOrder::DayFirst).unwrap();
        assert_eq!(am.hour(), 0);

        // No marker: read as 24-hour.
        let plain = parse_header_timestamp("12/08/23", "2:05", DateOrder::DayFirst).unwrap();
        assert_eq!(plain.hour(), 2);
    }

    #[test]
    fn test_lowercase_marker() {
        let ts = parse_header_timestamp("12/08/23", "2:05 pm", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.hour(), 14);
    }

    #[test]
    fn test_narrow_nbsp_before_marker() {
        let ts = parse_header_timestamp("12/08/23", "2:05\u{202f}PM", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.hour(), 14);

        let ts = parse_header_timestamp("12/08/23", "2:05\u{a0}AM", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.hour(), 2);
    }

    #[test]
    fn test_impossible_date_fails() {
        assert!(parse_header_timestamp("31/02/23", "10:00", DateOrder::DayFirst).is_err());
        assert!(parse_header_timestamp("12/13/23", "10:00", DateOrder::DayFirst).is_err());
    }

    #[test]
    fn test_order_swaps_validity() {
        // Month 13 is impossible day-first but fine month-first as a day.
        assert!(parse_header_timestamp("13/12/23", "10:00", DateOrder::DayFirst).is_ok());
        assert!(parse_header_timestamp("12/13/23", "10:00", DateOrder::MonthFirst).is_ok());
    }

    #[test]
    fn test_garbage_time_fails() {
        assert!(parse_header_timestamp("12/08/23", "25:00", DateOrder::DayFirst).is_err());
        assert!(parse_header_timestamp("12/08/23", "14:65", DateOrder::DayFirst).is_err());
        assert!(parse_header_timestamp("12/08/23", "noon", DateOrder::DayFirst).is_err());
        // 12-hour clock has no hour 14.
        assert!(parse_header_timestamp("12/08/23", "14:05 PM", DateOrder::DayFirst).is_err());
    }

    #[test]
    fn test_malformed_date_fails() {
        assert!(parse_header_timestamp("12/08", "14:05", DateOrder::DayFirst).is_err());
        assert!(parse_header_timestamp("12/08/23/4", "14:05", DateOrder::DayFirst).is_err());
        assert!(parse_header_timestamp("ab/cd/ef", "14:05", DateOrder::DayFirst).is_err());
    }

    #[test]
    fn test_error_keeps_raw_prefix() {
        let err = parse_header_timestamp("99/99/99", "14:05", DateOrder::DayFirst).unwrap_err();
        assert!(err.raw().contains("99/99/99"));
        assert!(err.to_string().contains("99/99/99"));
    }

    #[test]
    fn test_date_order_display_and_from_str() {
        use std::str::FromStr;

        assert_eq!(DateOrder::DayFirst.to_string(), "day-first");
        assert_eq!(DateOrder::MonthFirst.to_string(), "month-first");
        assert_eq!(DateOrder::from_str("dmy").unwrap(), DateOrder::DayFirst);
        assert_eq!(DateOrder::from_str("MDY").unwrap(), DateOrder::MonthFirst);
        assert!(DateOrder::from_str("ymd").is_err());
    }

    #[test]
    fn test_date_order_serde() {
        let json = serde_json::to_string(&DateOrder::DayFirst).unwrap();
        assert_eq!(json, "\"day-first\"");

        let parsed: DateOrder = serde_json::from_str("\"month-first\"").unwrap();
        assert_eq!(parsed, DateOrder::MonthFirst);
    }
}
