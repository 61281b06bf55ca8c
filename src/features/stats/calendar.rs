//! Calendar day data and day detail.
//!
//! Groups completions by calendar day for month views and for a single
//! day's per-habit breakdown. No streaks are computed here.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StreaksError;
use crate::habits::{Habit, HabitCompletion, HabitId};

/// One habit's state on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDayFlag {
    pub habit_id: HabitId,
    pub progress: f64,
    pub completed: bool,
}

/// Summary of one calendar day across all active habits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayData {
    pub date: NaiveDate,
    pub completed_count: usize,
    pub total_habits: usize,
    pub habits: Vec<HabitDayFlag>,
}

impl DayData {
    /// Every active habit met its target.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total_habits > 0 && self.completed_count == self.total_habits
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::Parse` for malformed input or an invalid month.
    pub fn parse(input: &str) -> Result<Self, StreaksError> {
        let err = || StreaksError::Parse(format!("invalid month '{input}', expected YYYY-MM"));
        let (year, month) = input.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)?;
        Ok(Self { year, month })
    }

    /// First day of the month.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` if the month is out of range.
    pub fn first_day(self) -> Result<NaiveDate, StreaksError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            StreaksError::InvalidArgument(format!("invalid month {}-{:02}", self.year, self.month))
        })
    }

    /// Last day of the month.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` if the month is out of range.
    pub fn last_day(self) -> Result<NaiveDate, StreaksError> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Ok(Self { year, month }.first_day()? - Duration::days(1))
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Build one `DayData` per day of `month`.
///
/// Only active habits are counted; completions of archived habits are
/// ignored.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` if the month is out of range.
pub fn month_days(
    month: Month,
    habits: &[Habit],
    completions: &[HabitCompletion],
) -> Result<Vec<DayData>, StreaksError> {
    let first = month.first_day()?;
    let last = month.last_day()?;
    let by_day = group_by_day(completions, first, last);

    Ok(first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| build_day(date, habits, by_day.get(&date)))
        .collect())
}

/// Build the `DayData` for a single date.
#[must_use]
pub fn day_data(date: NaiveDate, habits: &[Habit], completions: &[HabitCompletion]) -> DayData {
    let by_day = group_by_day(completions, date, date);
    build_day(date, habits, by_day.get(&date))
}

fn group_by_day(
    completions: &[HabitCompletion],
    from: NaiveDate,
    to: NaiveDate,
) -> HashMap<NaiveDate, HashMap<HabitId, f64>> {
    let mut by_day: HashMap<NaiveDate, HashMap<HabitId, f64>> = HashMap::new();
    for completion in completions {
        if completion.completion_date >= from && completion.completion_date <= to {
            by_day
                .entry(completion.completion_date)
                .or_default()
                .insert(completion.habit_id, completion.progress);
        }
    }
    by_day
}

fn build_day(date: NaiveDate, habits: &[Habit], logged: Option<&HashMap<HabitId, f64>>) -> DayData {
    let flags: Vec<HabitDayFlag> = habits
        .iter()
        .filter(|h| h.is_active)
        .map(|habit| {
            let progress = logged
                .and_then(|m| m.get(&habit.id))
                .copied()
                .unwrap_or(0.0);
            HabitDayFlag {
                habit_id: habit.id,
                progress,
                completed: habit.is_met_by(progress),
            }
        })
        .collect();

    DayData {
        date,
        completed_count: flags.iter().filter(|f| f.completed).count(),
        total_habits: flags.len(),
        habits: flags,
    }
}
