//! Date parsing and ranges.
//!
//! Strings only exist at the command-line edge. Everything past this module
//! works with `chrono` values.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Error)]
pub enum DateParseError {
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid date '{0}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidDateTime(String),

    #[error("end date {end} is before start date {start}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        DateParseError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Parse a commit date that may carry an explicit time of day.
///
/// Returns the time only when the input spelled one out.
pub fn parse_commit_date(input: &str) -> Result<(NaiveDate, Option<NaiveTime>), DateParseError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok((date, None));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| (dt.date(), Some(dt.time())))
        .ok_or_else(|| DateParseError::InvalidDateTime(input.to_string()))
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateParseError> {
        if end < start {
            return Err(DateParseError::ReversedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateParseError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The `days` calendar days ending at `today`, inclusive.
    ///
    /// Clamps to [`NaiveDate::MIN`] when the window reaches further back.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: today
                .checked_sub_signed(Duration::days(span))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every day in the range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("02/03/2024").is_err());
    }

    #[test]
    fn test_parse_commit_date_with_and_without_time() {
        let (date, time) = parse_commit_date("2024-03-01").unwrap();
        assert_eq!(date, ymd(2024, 3, 1));
        assert!(time.is_none());

        let (date, time) = parse_commit_date("2024-03-01 14:05:09").unwrap();
        assert_eq!(date, ymd(2024, 3, 1));
        assert_eq!(time, NaiveTime::from_hms_opt(14, 5, 9));

        let (_, time) = parse_commit_date("2024-03-01T08:30:00").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(8, 30, 0));

        assert!(parse_commit_date("yesterday").is_err());
    }

    #[test]
    fn test_range_iterates_inclusive() {
        let range = DateRange::parse("2024-02-27", "2024-03-02").unwrap();
        let days: Vec<_> = range.iter().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(range.len(), 5);
        assert_eq!(days.first(), Some(&ymd(2024, 2, 27)));
        assert_eq!(days.last(), Some(&ymd(2024, 3, 2)));
        assert!(days.contains(&ymd(2024, 2, 29)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(range.iter().count(), 1);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = DateRange::parse("2024-01-10", "2024-01-01").unwrap_err();
        assert!(matches!(err, DateParseError::ReversedRange { .. }));
    }

    #[test]
    fn test_trailing_window() {
        let range = DateRange::trailing(ymd(2024, 1, 30), 30);
        assert_eq!(range.start(), ymd(2024, 1, 1));
        assert_eq!(range.end(), ymd(2024, 1, 30));
        assert_eq!(range.len(), 30);
    }

    #[test]
    fn test_trailing_window_clamps_to_earliest_date() {
        let today = ymd(2026, 10, 16);
        let range = DateRange::trailing(today, u32::MAX);
        assert_eq!(range.start(), NaiveDate::MIN);
        assert_eq!(range.end(), today);
        assert!(range.contains(ymd(1970, 1, 1)));
    }
}
