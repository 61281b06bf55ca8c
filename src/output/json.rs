//! JSON output formatting for streaks.

use serde::Serialize;
use serde_json::json;

use crate::error::StreaksError;
use crate::features::stats::{DayData, Month};
use crate::habits::{Habit, HabitCompletion};

/// Format habits as JSON
///
/// # Errors
///
/// Returns `StreaksError::Json` if serialization fails.
pub fn format_habits_json(habits: &[Habit]) -> Result<String, StreaksError> {
    let output = json!({
        "count": habits.len(),
        "items": habits
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a habit's completion history as JSON
///
/// # Errors
///
/// Returns `StreaksError::Json` if serialization fails.
pub fn format_history_json(
    habit: &Habit,
    completions: &[HabitCompletion],
) -> Result<String, StreaksError> {
    let output = json!({
        "habit": habit,
        "count": completions.len(),
        "items": completions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a month of day data as JSON
///
/// # Errors
///
/// Returns `StreaksError::Json` if serialization fails.
pub fn format_calendar_json(
    month: Month,
    habits: &[Habit],
    days: &[DayData],
) -> Result<String, StreaksError> {
    let output = json!({
        "month": month.to_string(),
        "habits": habits,
        "days": days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StreaksError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StreaksError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn make_habit(name: &str) -> Habit {
        Habit {
            id: 7,
            name: name.to_string(),
            target: 8.0,
            unit: Some("glasses".to_string()),
            color: "#3b82f6".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_habits_json() {
        let json = format_habits_json(&[make_habit("Water"), make_habit("Read")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["items"][0]["name"], "Water");
        assert_eq!(parsed["items"][0]["unit"], "glasses");
    }

    #[test]
    fn test_format_history_json() {
        let habit = make_habit("Water");
        let completions = [HabitCompletion::new(
            7,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            3.0,
        )];
        let json = format_history_json(&habit, &completions).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["completion_date"], "2026-10-16");
        assert_eq!(parsed["habit"]["id"], 7);
    }
}
