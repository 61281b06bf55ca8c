//! Date parsing utilities.
//!
//! Habit logs look backward, so relative expressions resolve to the past:
//! `monday` means the most recent Monday, `mar 3` the most recent March 3rd.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::StreaksError;

/// The local calendar day.
///
/// This is the only place the wall clock is read; everything else takes an
/// explicit as-of date.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date expression relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `3 days ago`, `2 weeks ago`
/// - `monday`, `last friday` (most recent occurrence, today included for
///   the bare weekday)
/// - `dec 15`, `december 15` (most recent occurrence)
/// - `2024-12-15`
///
/// # Errors
///
/// Returns `StreaksError::Parse` if the input matches none of the forms.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, StreaksError> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Ok(today),
        "yesterday" => return today.pred_opt().ok_or_else(|| before_calendar(&input)),
        _ => {},
    }

    if let Some(date) = parse_ago(&input, today) {
        return Ok(date);
    }

    if let Some(date) = parse_weekday(&input, today) {
        return date;
    }

    if let Some(date) = parse_month_day(&input, today) {
        return Ok(date);
    }

    NaiveDate::parse_from_str(&input, "%Y-%m-%d")
        .map_err(|_| StreaksError::Parse(format!("could not understand date '{input}'")))
}

/// Parse `N days ago` / `N weeks ago`.
fn parse_ago(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 || parts[2] != "ago" {
        return None;
    }

    let amount: i64 = parts[0].parse().ok()?;
    if amount < 0 {
        return None;
    }
    let days = match parts[1].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_sub_signed(Duration::try_days(days)?)
}

fn parse_weekday(input: &str, today: NaiveDate) -> Option<Result<NaiveDate, StreaksError>> {
    let (name, strictly_before) = input
        .strip_prefix("last ")
        .map_or((input, false), |rest| (rest, true));

    let weekday = weekday_from_str(name)?;
    let mut back = (7 + today.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    if back == 0 && strictly_before {
        back = 7;
    }
    Some(
        today
            .checked_sub_signed(Duration::days(i64::from(back)))
            .ok_or_else(|| before_calendar(input)),
    )
}

fn before_calendar(input: &str) -> StreaksError {
    StreaksError::Parse(format!("'{input}' falls before the earliest supported date"))
}

fn weekday_from_str(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse `dec 15` / `december 15`, choosing the most recent such day.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    let month = month_from_str(parts[0])?;
    let day: u32 = parts[1].trim_end_matches(',').parse().ok()?;

    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day);
    match this_year {
        Some(date) if date <= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() - 1, month, day),
    }
}

fn month_from_str(s: &str) -> Option<u32> {
    match s {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Friday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(parse_date("today", today()).unwrap(), today());
        assert_eq!(parse_date("Yesterday", today()).unwrap(), date(2026, 10, 15));
    }

    #[test]
    fn test_ago() {
        assert_eq!(parse_date("3 days ago", today()).unwrap(), date(2026, 10, 13));
        assert_eq!(parse_date("1 day ago", today()).unwrap(), date(2026, 10, 15));
        assert_eq!(parse_date("2 weeks ago", today()).unwrap(), date(2026, 10, 2));
        assert!(parse_date("-2 days ago", today()).is_err());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(parse_date("friday", today()).unwrap(), today());
        assert_eq!(parse_date("last friday", today()).unwrap(), date(2026, 10, 9));
        assert_eq!(parse_date("mon", today()).unwrap(), date(2026, 10, 12));
        assert_eq!(parse_date("saturday", today()).unwrap(), date(2026, 10, 10));
    }

    #[test]
    fn test_month_day() {
        assert_eq!(parse_date("oct 1", today()).unwrap(), date(2026, 10, 1));
        assert_eq!(parse_date("december 25", today()).unwrap(), date(2025, 12, 25));
        assert!(parse_date("feb 30", today()).is_err());
    }

    #[test]
    fn test_relative_date_at_min_date_is_error() {
        let earliest = NaiveDate::MIN;
        assert_eq!(parse_date("today", earliest).unwrap(), earliest);
        assert!(matches!(
            parse_date("yesterday", earliest),
            Err(StreaksError::Parse(_))
        ));
        assert!(matches!(
            parse_date("last friday", earliest),
            Err(StreaksError::Parse(_))
        ));
        assert!(parse_date("3 days ago", earliest).is_err());
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_date("2026-01-05", today()).unwrap(), date(2026, 1, 5));
        assert!(matches!(
            parse_date("someday", today()),
            Err(StreaksError::Parse(_))
        ));
    }
}
