//! Rolling-window completion statistics.
//!
//! Computes streaks, completion rate, and average progress for one habit
//! over a trailing window of days ending at an explicit as-of day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StreaksError;
use crate::habits::{HabitCompletion, HabitId};

/// Target used for completion checks: `max(target, 1)`.
///
/// A zero, negative, or NaN target would make every day trivially complete
/// and divide by zero in the progress ratio, so it is raised to 1.
#[must_use]
pub fn effective_target(target: f64) -> f64 {
    target.max(1.0)
}

/// Longest window accepted, in days (a little over 100 years).
pub const MAX_WINDOW_DAYS: u32 = 36_600;

/// First day of a `days`-long window ending at `as_of` (inclusive).
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` if `days` is 0, exceeds
/// [`MAX_WINDOW_DAYS`], or the window reaches past the earliest
/// representable date.
pub fn window_start(as_of: NaiveDate, days: u32) -> Result<NaiveDate, StreaksError> {
    if days == 0 {
        return Err(StreaksError::InvalidArgument(
            "window must cover at least 1 day".to_string(),
        ));
    }
    if days > MAX_WINDOW_DAYS {
        return Err(StreaksError::InvalidArgument(format!(
            "windows are limited to {MAX_WINDOW_DAYS} days, got {days}"
        )));
    }
    as_of
        .checked_sub_signed(Duration::days(i64::from(days) - 1))
        .ok_or_else(|| StreaksError::InvalidArgument(format!("a {days}-day window is too long")))
}

/// One day inside a statistics window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub progress: f64,
    pub completed: bool,
}

/// Statistics for one habit over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsWindow {
    pub habit_id: HabitId,
    /// Target after clamping.
    pub target: f64,
    /// Oldest day in the window.
    pub start: NaiveDate,
    /// The as-of day.
    pub end: NaiveDate,
    pub total_days: u32,
    pub completed_days: u32,
    /// Percentage of days meeting the target, 0-100.
    pub completion_rate: f64,
    /// Mean of per-day progress ratios capped at 1, as a percentage.
    pub average_progress: f64,
    /// Run of complete days ending at the as-of day.
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Per-day flags, newest first.
    pub days: Vec<DayStatus>,
}

impl StatsWindow {
    /// Calculate statistics for `habit_id` over the `days` days ending at
    /// `as_of` (inclusive).
    ///
    /// Completions for other habits or outside the window are ignored. A day
    /// with no record counts as progress 0.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` if `days` is 0 or above
    /// [`MAX_WINDOW_DAYS`].
    pub fn calculate(
        habit_id: HabitId,
        target: f64,
        days: u32,
        completions: &[HabitCompletion],
        as_of: NaiveDate,
    ) -> Result<Self, StreaksError> {
        let start = window_start(as_of, days)?;
        let target = effective_target(target);

        let by_date: HashMap<NaiveDate, f64> = completions
            .iter()
            .filter(|c| c.habit_id == habit_id)
            .filter(|c| c.completion_date >= start && c.completion_date <= as_of)
            .map(|c| (c.completion_date, c.progress))
            .collect();

        let mut running_streak = 0u32;
        let mut current_streak = 0u32;
        let mut current_open = true;
        let mut longest_streak = 0u32;
        let mut completed_days = 0u32;
        let mut ratio_sum = 0.0;
        let mut day_statuses = Vec::with_capacity(days as usize);

        for offset in 0..days {
            let date = as_of - Duration::days(i64::from(offset));
            let progress = by_date.get(&date).copied().unwrap_or(0.0).max(0.0);
            let completed = progress >= target;

            if completed {
                running_streak += 1;
                completed_days += 1;
                if current_open {
                    current_streak = running_streak;
                }
            } else {
                running_streak = 0;
                current_open = false;
            }
            longest_streak = longest_streak.max(running_streak);
            ratio_sum += (progress / target).min(1.0);

            day_statuses.push(DayStatus {
                date,
                progress,
                completed,
            });
        }

        let total = f64::from(days);
        Ok(Self {
            habit_id,
            target,
            start,
            end: as_of,
            total_days: days,
            completed_days,
            completion_rate: f64::from(completed_days) / total * 100.0,
            average_progress: ratio_sum / total * 100.0,
            current_streak,
            longest_streak,
            days: day_statuses,
        })
    }

    /// Whether the as-of day met the target.
    #[must_use]
    pub fn is_complete_today(&self) -> bool {
        self.days.first().is_some_and(|d| d.completed)
    }

    /// Per-day progress ratios (0-1), oldest first, for charts.
    #[must_use]
    pub fn ratios_oldest_first(&self) -> Vec<f64> {
        self.days
            .iter()
            .rev()
            .map(|d| (d.progress / self.target).min(1.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HABIT: HabitId = 1;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    fn log(days_ago: i64, progress: f64) -> HabitCompletion {
        HabitCompletion::new(HABIT, ago(days_ago), progress)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_two_day_streak_broken_before() {
        let completions = [log(0, 1.0), log(1, 1.0), log(2, 0.0)];
        let stats = StatsWindow::calculate(HABIT, 1.0, 3, &completions, today()).unwrap();

        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.completed_days, 2);
        assert!(approx(stats.completion_rate, 66.67));
    }

    #[test]
    fn test_partial_progress_single_day() {
        let stats = StatsWindow::calculate(HABIT, 5.0, 1, &[log(0, 3.0)], today()).unwrap();

        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.current_streak, 0);
        assert!(approx(stats.average_progress, 60.0));
    }

    #[test]
    fn test_no_completions() {
        let stats = StatsWindow::calculate(HABIT, 1.0, 5, &[], today()).unwrap();

        assert_eq!(stats.total_days, 5);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
        assert!(approx(stats.completion_rate, 0.0));
        assert!(approx(stats.average_progress, 0.0));
    }

    #[test]
    fn test_gap_after_today() {
        let completions = [log(0, 2.0), log(1, 0.0), log(2, 2.0), log(3, 2.0)];
        let stats = StatsWindow::calculate(HABIT, 2.0, 4, &completions, today()).unwrap();

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.completed_days, 3);
    }

    #[test]
    fn test_every_day_complete() {
        let completions: Vec<_> = (0..7).map(|d| log(d, 3.0)).collect();
        let stats = StatsWindow::calculate(HABIT, 3.0, 7, &completions, today()).unwrap();

        assert_eq!(stats.completed_days, 7);
        assert_eq!(stats.current_streak, 7);
        assert_eq!(stats.longest_streak, 7);
        assert!(approx(stats.completion_rate, 100.0));
        assert!(approx(stats.average_progress, 100.0));
    }

    #[test]
    fn test_missing_today_zeroes_current_streak() {
        let completions: Vec<_> = (1..10).map(|d| log(d, 1.0)).collect();
        let stats = StatsWindow::calculate(HABIT, 1.0, 10, &completions, today()).unwrap();

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 9);
        assert!(!stats.is_complete_today());
    }

    #[test]
    fn test_target_clamped_to_one() {
        let completions = [log(0, 0.5), log(1, 1.0)];
        for target in [0.0, -4.0, 0.25, f64::NAN] {
            let stats = StatsWindow::calculate(HABIT, target, 2, &completions, today()).unwrap();
            assert!(approx(stats.target, 1.0));
            assert_eq!(stats.completed_days, 1);
            assert_eq!(stats.current_streak, 0);
            assert!(approx(stats.average_progress, 75.0));
        }
    }

    #[test]
    fn test_zero_days_rejected() {
        let result = StatsWindow::calculate(HABIT, 1.0, 0, &[], today());
        assert!(matches!(result, Err(StreaksError::InvalidArgument(_))));
    }

    #[test]
    fn test_window_length_is_bounded() {
        let result = StatsWindow::calculate(HABIT, 1.0, MAX_WINDOW_DAYS + 1, &[], today());
        assert!(matches!(result, Err(StreaksError::InvalidArgument(_))));
        assert!(matches!(
            window_start(today(), u32::MAX),
            Err(StreaksError::InvalidArgument(_))
        ));

        let start = window_start(today(), MAX_WINDOW_DAYS).unwrap();
        assert_eq!((today() - start).num_days(), i64::from(MAX_WINDOW_DAYS) - 1);
    }

    #[test]
    fn test_ignores_other_habits_and_out_of_window() {
        let completions = [
            HabitCompletion::new(2, today(), 5.0),
            log(3, 5.0),
            HabitCompletion::new(HABIT, today() + Duration::days(1), 5.0),
            log(0, 5.0),
        ];
        let stats = StatsWindow::calculate(HABIT, 1.0, 3, &completions, today()).unwrap();

        assert_eq!(stats.completed_days, 1);
        assert_eq!(stats.start, ago(2));
        assert_eq!(stats.end, today());
    }

    #[test]
    fn test_over_target_progress_capped_in_average() {
        let stats = StatsWindow::calculate(HABIT, 2.0, 2, &[log(0, 10.0)], today()).unwrap();
        assert!(approx(stats.average_progress, 50.0));
    }

    #[test]
    fn test_negative_progress_treated_as_zero() {
        let stats = StatsWindow::calculate(HABIT, 1.0, 1, &[log(0, -3.0)], today()).unwrap();
        assert!(approx(stats.average_progress, 0.0));
    }

    #[test]
    fn test_invariants_hold_over_patterns() {
        // Every on/off pattern over 8 days
        for mask in 0u32..256 {
            let completions: Vec<_> = (0..8)
                .map(|d| log(i64::from(d), if mask & (1 << d) != 0 { 2.0 } else { 0.5 }))
                .collect();
            let stats = StatsWindow::calculate(HABIT, 2.0, 8, &completions, today()).unwrap();

            assert!(stats.current_streak <= stats.longest_streak);
            assert!(stats.longest_streak <= stats.total_days);
            assert!((0.0..=100.0).contains(&stats.completion_rate));
            assert!((0.0..=100.0).contains(&stats.average_progress));
            assert_eq!(stats.completed_days, mask.count_ones());
            assert_eq!(stats.current_streak, mask.trailing_ones());
        }
    }

    #[test]
    fn test_idempotent() {
        let completions = [log(0, 1.0), log(2, 1.0)];
        let a = StatsWindow::calculate(HABIT, 1.0, 5, &completions, today()).unwrap();
        let b = StatsWindow::calculate(HABIT, 1.0, 5, &completions, today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_days_newest_first_and_ratios_oldest_first() {
        let stats = StatsWindow::calculate(HABIT, 4.0, 3, &[log(0, 2.0), log(2, 4.0)], today()).unwrap();

        assert_eq!(stats.days[0].date, today());
        assert_eq!(stats.days[2].date, ago(2));
        let ratios = stats.ratios_oldest_first();
        assert!(approx(ratios[0], 1.0));
        assert!(approx(ratios[1], 0.0));
        assert!(approx(ratios[2], 0.5));
    }
}
