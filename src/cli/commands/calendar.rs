//! Month calendar and single-day views across all habits.

use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::features::stats::{day_data, month_days, Month};
use crate::output::{format_calendar_json, format_calendar_pretty, format_day_pretty, to_json};

/// Execute the calendar command for `month` (YYYY-MM) or the as-of month.
///
/// # Errors
///
/// Returns `StreaksError::Parse` for a malformed month.
pub fn calendar(ctx: &Context, month: Option<&str>) -> Result<String, StreaksError> {
    let month = month.map_or(Ok(Month::of(ctx.as_of)), Month::parse)?;
    let habits = ctx.store.list(false)?;
    let completions =
        ctx.store
            .completions(None, Some(month.first_day()?), Some(month.last_day()?))?;
    let days = month_days(month, &habits, &completions)?;

    match ctx.format {
        OutputFormat::Json => format_calendar_json(month, &habits, &days),
        OutputFormat::Pretty => Ok(format_calendar_pretty(month, &days)),
    }
}

/// Execute the day command: every active habit's progress on one date.
///
/// # Errors
///
/// Returns `StreaksError::Parse` for an unrecognised date.
pub fn day(ctx: &Context, date: Option<&str>) -> Result<String, StreaksError> {
    let date = ctx.date_or_today(date)?;
    let habits = ctx.store.list(false)?;
    let completions = ctx.store.completions(None, Some(date), Some(date))?;
    let data = day_data(date, &habits, &completions);

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "day": data,
            "completions": completions
        })),
        OutputFormat::Pretty => Ok(format_day_pretty(&data, &habits, &completions)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_habit, context};
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_calendar_defaults_to_as_of_month() {
        let ctx = context(OutputFormat::Json);
        let habit = add_habit(&ctx, "Read", 1.0);
        ctx.store
            .upsert_completion(habit.id, NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(), 1.0, None)
            .unwrap();

        let output = calendar(&ctx, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["month"], "2026-10");
        assert_eq!(parsed["days"].as_array().unwrap().len(), 31);
        assert_eq!(parsed["days"][2]["completed_count"], 1);
        assert_eq!(parsed["days"][2]["total_habits"], 1);
    }

    #[test]
    fn test_calendar_bad_month() {
        let ctx = context(OutputFormat::Json);
        assert!(matches!(
            calendar(&ctx, Some("2026-13")),
            Err(StreaksError::Parse(_))
        ));
    }

    #[test]
    fn test_day_detail() {
        let ctx = context(OutputFormat::Json);
        let read = add_habit(&ctx, "Read", 1.0);
        add_habit(&ctx, "Water", 8.0);
        ctx.store
            .upsert_completion(read.id, ctx.as_of, 1.0, Some("chapter 3"))
            .unwrap();

        let output = day(&ctx, Some("today")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["day"]["completed_count"], 1);
        assert_eq!(parsed["day"]["total_habits"], 2);
        assert_eq!(parsed["completions"][0]["notes"], "chapter 3");
    }
}
