use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDate, Utc};
use thiserror::Error;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATE_DISPLAY_FORMAT: &str = "%d %B %Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date format: expected YYYY-MM-DD")]
    InvalidDateFormat,
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Meeting dates are calendar days with no time of day and no timezone.
pub fn parse_meeting_date(input: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .map_err(|_| TimeParseError::InvalidDateFormat)
}

pub fn format_date_input(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

/// Falls back to [`DEFAULT_DATE_DISPLAY_FORMAT`] when `format` cannot be
/// rendered for a bare date.
pub fn format_meeting_date(date: NaiveDate, format: &str) -> String {
    try_format_date(date, format)
        .unwrap_or_else(|| date.format(DEFAULT_DATE_DISPLAY_FORMAT).to_string())
}

/// A pattern is usable when it renders a date without error. Time-of-day and
/// offset specifiers (`%H`, `%M`, `%z`) fail for a `NaiveDate`.
pub fn is_valid_date_format(format: &str) -> bool {
    !format.trim().is_empty() && try_format_date(NaiveDate::default(), format).is_some()
}

fn try_format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Midnight UTC of `date`, used when a creation time must be derived from a
/// meeting date.
pub fn start_of_day_utc(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{
        format_date_input, format_meeting_date, is_valid_date_format, parse_meeting_date,
        start_of_day_utc, TimeParseError,
    };
    use chrono::NaiveDate;

    #[test]
    fn parse_meeting_date_accepts_iso_day() {
        let date = parse_meeting_date(" 2025-11-28 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 28).unwrap());
        assert_eq!(format_date_input(date), "2025-11-28");
    }

    #[test]
    fn parse_meeting_date_rejects_empty_and_garbage() {
        assert_eq!(parse_meeting_date("  "), Err(TimeParseError::Empty));
        assert_eq!(
            parse_meeting_date("28.11.2025"),
            Err(TimeParseError::InvalidDateFormat)
        );
        assert_eq!(
            parse_meeting_date("2025-02-30"),
            Err(TimeParseError::InvalidDateFormat)
        );
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("%d %B %Y"));
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format(""));
        assert!(!is_valid_date_format("%d.%m.%Y %H:%M"));
        assert!(!is_valid_date_format("%Y %z"));
    }

    #[test]
    fn format_meeting_date_falls_back_on_time_specifiers() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        assert_eq!(format_meeting_date(date, "%d.%m.%Y %H:%M"), "28 November 2025");
    }

    #[test]
    fn format_meeting_date_uses_pattern() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        assert_eq!(format_meeting_date(date, "%d %B %Y"), "05 November 2025");
    }

    #[test]
    fn start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(start_of_day_utc(date), 86_400);
    }
}
