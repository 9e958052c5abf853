//! NOTAM schedule (item D) formatting.
//!
//! Turns `YYMMDDHHMM TO YYMMDDHHMM` ranges into the compact
//! `MON DD HHMM-HHMM` notation, grouping ranges that start on the same day.

use crate::{GeoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TIME_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{10}) TO ([0-9]{10})").unwrap());

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// One `YYMMDDHHMM TO YYMMDDHHMM` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    /// Start, `YYMMDDHHMM`
    pub start: String,
    /// End, `YYMMDDHHMM`
    pub end: String,
}

impl TimeRange {
    /// Creates a range from two 10-digit stamps.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Split `YYMMDDHHMM` stamp.
struct Stamp<'a> {
    month: &'static str,
    month_day: &'a str,
    day: &'a str,
    time: &'a str,
}

impl<'a> Stamp<'a> {
    fn parse(raw: &'a str) -> Result<Self> {
        let invalid = || GeoError::InvalidSchedule(format!("malformed time stamp '{}'", raw));
        if raw.len() != 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let month = raw[2..4]
            .parse::<usize>()
            .ok()
            .and_then(|m| m.checked_sub(1))
            .and_then(|m| MONTHS.get(m))
            .ok_or_else(|| {
                GeoError::InvalidSchedule(format!("invalid month '{}' in '{}'", &raw[2..4], raw))
            })?;
        Ok(Self {
            month,
            month_day: &raw[2..6],
            day: &raw[4..6],
            time: &raw[6..10],
        })
    }
}

/// Finds every `YYMMDDHHMM TO YYMMDDHHMM` range in `text`, in order.
pub fn extract_time_ranges(text: &str) -> Vec<TimeRange> {
    TIME_RANGE
        .captures_iter(text)
        .map(|caps| TimeRange::new(&caps[1], &caps[2]))
        .collect()
}

/// Renders ranges in compact item-D notation.
///
/// A range starting on a new day opens a group `MON DD HHMM-HHMM`; ranges
/// starting on the same day as the previous one are appended to that group.
/// An end in a different month is written in full as `MON DD HHMM`.
///
/// # Errors
/// [`GeoError::InvalidSchedule`] for malformed stamps or month numbers.
///
/// # Example
/// ```
/// use aerocoord_geo::{extract_time_ranges, format_time_ranges};
///
/// let ranges = extract_time_ranges(
///     "2403010800 TO 2403011200 2403011400 TO 2403011600 2403020800 TO 2403021200",
/// );
/// assert_eq!(
///     format_time_ranges(&ranges).unwrap(),
///     "MAR 01 0800-1200 1400-1600, MAR 02 0800-1200"
/// );
/// ```
pub fn format_time_ranges(ranges: &[TimeRange]) -> Result<String> {
    let mut groups: Vec<String> = Vec::new();
    let mut previous_day: Option<String> = None;

    for range in ranges {
        let start = Stamp::parse(&range.start)?;
        let end = Stamp::parse(&range.end)?;

        let end_text = if start.month == end.month {
            end.time.to_string()
        } else {
            format!("{} {} {}", end.month, end.day, end.time)
        };

        let same_day = previous_day.as_deref() == Some(start.month_day);
        match groups.last_mut() {
            Some(group) if same_day => group.push_str(&format!(" {}-{}", start.time, end_text)),
            Some(group) => group.push(','),
            None => {}
        }
        if !same_day {
            groups.push(format!("{} {} {}-{}", start.month, start.day, start.time, end_text));
        }
        previous_day = Some(start.month_day.to_string());
    }

    Ok(groups.join(" "))
}
